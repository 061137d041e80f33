//! Mount context resolution.
//!
//! The tooling either lives inside a host project as an embedded subtree
//! (`host/prism/...`) or is checked out on its own. Which of the two applies is
//! decided once, from path arithmetic on the directory holding the tool, and the
//! resulting [`MountContext`] is passed explicitly to everything downstream.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::SUBTREE_DIR_NAME;

/// Errors that can occur while classifying the mount context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
  /// The subtree root and its parent both carry the reserved name.
  #[error(
    "ambiguous mount context: '{}' and its parent '{}' are both named '{}'; rename one of them",
    subtree.display(),
    parent.display(),
    SUBTREE_DIR_NAME
  )]
  Ambiguous { subtree: PathBuf, parent: PathBuf },

  /// The subtree root sits at the filesystem root, so there is no host above it.
  #[error("subtree root '{}' has no parent directory to act as host root", path.display())]
  NoHostRoot { path: PathBuf },
}

/// How the tooling is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountKind {
  /// Running from the `prism` subtree inside a host project.
  Embedded,
  /// Running from a project of its own.
  Standalone,
}

impl MountKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Embedded => "embedded",
      Self::Standalone => "standalone",
    }
  }
}

impl fmt::Display for MountKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The resolved execution context.
///
/// Fields are private so that `host_root` is present exactly when the kind is
/// [`MountKind::Embedded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountContext {
  kind: MountKind,
  self_root: PathBuf,
  host_root: Option<PathBuf>,
}

impl MountContext {
  /// Classify the context from the tool directory.
  ///
  /// If `tool_dir` or its parent is named like the subtree, the context is
  /// embedded and the host root is the directory above the subtree root.
  /// Otherwise the context is standalone and `cwd` is the project root.
  pub fn resolve(tool_dir: &Path, cwd: &Path) -> Result<Self, ContextError> {
    let subtree_root = if is_subtree_dir(tool_dir) {
      Some(tool_dir)
    } else {
      tool_dir.parent().filter(|parent| is_subtree_dir(parent))
    };

    let Some(subtree_root) = subtree_root else {
      return Ok(Self::standalone(cwd.to_path_buf()));
    };

    let host_root = subtree_root
      .parent()
      .filter(|parent| !parent.as_os_str().is_empty())
      .ok_or_else(|| ContextError::NoHostRoot {
        path: subtree_root.to_path_buf(),
      })?;

    if is_subtree_dir(host_root) {
      return Err(ContextError::Ambiguous {
        subtree: subtree_root.to_path_buf(),
        parent: host_root.to_path_buf(),
      });
    }

    Ok(Self::embedded(subtree_root.to_path_buf(), host_root.to_path_buf()))
  }

  pub fn standalone(self_root: PathBuf) -> Self {
    Self {
      kind: MountKind::Standalone,
      self_root,
      host_root: None,
    }
  }

  pub fn embedded(self_root: PathBuf, host_root: PathBuf) -> Self {
    Self {
      kind: MountKind::Embedded,
      self_root,
      host_root: Some(host_root),
    }
  }

  pub fn kind(&self) -> MountKind {
    self.kind
  }

  pub fn is_embedded(&self) -> bool {
    self.kind == MountKind::Embedded
  }

  /// Root of the tooling itself: the subtree when embedded, the project otherwise.
  pub fn self_root(&self) -> &Path {
    &self.self_root
  }

  pub fn host_root(&self) -> Option<&Path> {
    self.host_root.as_deref()
  }

  /// Root whose manifest declares the workspaces to operate on.
  pub fn project_root(&self) -> &Path {
    self.host_root().unwrap_or(&self.self_root)
  }

  /// Path of the subtree relative to the host root (e.g. `prism`).
  pub fn subtree_prefix(&self) -> Option<PathBuf> {
    let host_root = self.host_root()?;
    self.self_root.strip_prefix(host_root).ok().map(Path::to_path_buf)
  }
}

fn is_subtree_dir(path: &Path) -> bool {
  path.file_name() == Some(OsStr::new(SUBTREE_DIR_NAME))
}
