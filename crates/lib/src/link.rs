//! Idempotent directory links between a host project and the subtree.
//!
//! [`ensure_link`] guarantees that a path in the host root is a relative symlink
//! to the matching directory in the subtree root:
//!
//! ```text
//! host/
//!   .claude/commands -> ../prism/.claude/commands
//!   prism/
//!     .claude/commands/
//! ```
//!
//! The state of the link path is read immediately before acting on it. There is
//! no lock, so concurrent invocations may race.
//!
//! # Cross-Platform
//!
//! - **Unix**: `std::os::unix::fs::symlink`
//! - **Windows**: `symlink_dir` (needs developer mode or elevation). Existing
//!   junctions are recognised when inspecting but never created.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Kind of a non-link filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  File,
  Directory,
  Other,
}

impl EntryKind {
  fn of(file_type: &fs::FileType) -> Self {
    if file_type.is_dir() {
      Self::Directory
    } else if file_type.is_file() {
      Self::File
    } else {
      Self::Other
    }
  }
}

impl fmt::Display for EntryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::File => "file",
      Self::Directory => "directory",
      Self::Other => "special file",
    };
    write!(f, "{}", s)
  }
}

/// What currently occupies a link path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymlinkState {
  Absent,
  /// A link resolving to the expected target.
  CorrectSymlink,
  /// A link resolving elsewhere, or nowhere. Holds the raw link target.
  StaleSymlink(PathBuf),
  /// A real file or directory.
  RealEntry(EntryKind),
}

/// What [`ensure_link`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
  Created,
  Unchanged,
  Replaced { previous: PathBuf },
}

#[derive(Debug, Error)]
pub enum LinkError {
  #[error("failed to create directory '{}': {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to inspect '{}': {source}", path.display())]
  Inspect {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A real entry occupies the link path; it is left untouched.
  #[error(
    "'{}' is a real {kind}, not a symlink; move or delete it manually, then re-run",
    path.display()
  )]
  Conflict { path: PathBuf, kind: EntryKind },

  #[error("failed to remove stale link '{}': {source}", path.display())]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create symlink '{}' -> '{}': {source}", link.display(), target.display())]
  CreateSymlink {
    link: PathBuf,
    target: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Classify what occupies `link` relative to the expected `target`.
///
/// Links are compared by their canonicalized destination, so a relative and an
/// absolute link to the same directory are both correct. `target` must exist.
pub fn inspect(link: &Path, target: &Path) -> io::Result<SymlinkState> {
  let metadata = match fs::symlink_metadata(link) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SymlinkState::Absent),
    Err(e) => return Err(e),
  };

  let Some(raw_target) = read_dir_link(link, &metadata) else {
    return Ok(SymlinkState::RealEntry(EntryKind::of(&metadata.file_type())));
  };

  let expected = dunce::canonicalize(target)?;
  match dunce::canonicalize(link) {
    Ok(resolved) if resolved == expected => Ok(SymlinkState::CorrectSymlink),
    _ => Ok(SymlinkState::StaleSymlink(raw_target)),
  }
}

/// Make `link` a relative symlink to `target`.
///
/// Creates `target` and the parent of `link` when missing. An existing correct
/// link is left alone, a stale one is replaced, and a real file or directory
/// is reported as [`LinkError::Conflict`] without being modified.
pub fn ensure_link(link: &Path, target: &Path) -> Result<LinkOutcome, LinkError> {
  if !target.exists() {
    fs::create_dir_all(target).map_err(|e| LinkError::CreateDir {
      path: target.to_path_buf(),
      source: e,
    })?;
    debug!(target = %target.display(), "created missing link target");
  }

  let parent = link_parent(link);
  if !parent.exists() {
    fs::create_dir_all(&parent).map_err(|e| LinkError::CreateDir {
      path: parent.clone(),
      source: e,
    })?;
  }

  let state = inspect(link, target).map_err(|e| LinkError::Inspect {
    path: link.to_path_buf(),
    source: e,
  })?;

  match state {
    SymlinkState::Absent => {
      let relative = create_relative_link(link, target)?;
      info!(link = %link.display(), target = %relative.display(), "created link");
      Ok(LinkOutcome::Created)
    }
    SymlinkState::CorrectSymlink => {
      debug!(link = %link.display(), "link already correct");
      Ok(LinkOutcome::Unchanged)
    }
    SymlinkState::StaleSymlink(previous) => {
      remove_link(link)?;
      let relative = create_relative_link(link, target)?;
      info!(
        link = %link.display(),
        previous = %previous.display(),
        target = %relative.display(),
        "replaced stale link"
      );
      Ok(LinkOutcome::Replaced { previous })
    }
    SymlinkState::RealEntry(kind) => Err(LinkError::Conflict {
      path: link.to_path_buf(),
      kind,
    }),
  }
}

/// Probe whether directory symlinks can be created under `dir`.
///
/// Creates and discards a throwaway link in a temporary directory.
pub fn symlink_supported(dir: &Path) -> bool {
  let Ok(probe) = tempfile::Builder::new().prefix(".prism-probe").tempdir_in(dir) else {
    return false;
  };

  let target = probe.path().join("target");
  if fs::create_dir(&target).is_err() {
    return false;
  }

  create_dir_link(Path::new("target"), &probe.path().join("link")).is_ok()
}

fn link_parent(link: &Path) -> PathBuf {
  match link.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}

/// Create `link` pointing at `target` through a path relative to the link's
/// directory. Returns the relative path written into the link.
fn create_relative_link(link: &Path, target: &Path) -> Result<PathBuf, LinkError> {
  let canonicalize = |path: &Path| {
    dunce::canonicalize(path).map_err(|e| LinkError::Inspect {
      path: path.to_path_buf(),
      source: e,
    })
  };

  let parent = canonicalize(link_parent(link).as_path())?;
  let target = canonicalize(target)?;
  let relative = pathdiff::diff_paths(&target, &parent).unwrap_or(target);

  create_dir_link(&relative, link).map_err(|e| LinkError::CreateSymlink {
    link: link.to_path_buf(),
    target: relative.clone(),
    source: e,
  })?;

  Ok(relative)
}

#[cfg(unix)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
  std::os::windows::fs::symlink_dir(target, link)
}

/// Read the target of a directory link (symlink) on Unix.
///
/// Returns `None` if the path is not a symlink.
#[cfg(unix)]
fn read_dir_link(link: &Path, metadata: &fs::Metadata) -> Option<PathBuf> {
  if !metadata.file_type().is_symlink() {
    return None;
  }
  fs::read_link(link).ok()
}

/// Read the target of a directory link (symlink or junction) on Windows.
#[cfg(windows)]
fn read_dir_link(link: &Path, _metadata: &fs::Metadata) -> Option<PathBuf> {
  if let Ok(target) = fs::read_link(link) {
    return Some(target);
  }
  junction::get_target(link).ok()
}

#[cfg(unix)]
fn remove_link(link: &Path) -> Result<(), LinkError> {
  fs::remove_file(link).map_err(|e| LinkError::Remove {
    path: link.to_path_buf(),
    source: e,
  })
}

/// Directory symlinks and junctions are removed as directories on Windows.
#[cfg(windows)]
fn remove_link(link: &Path) -> Result<(), LinkError> {
  fs::remove_dir(link)
    .or_else(|_| fs::remove_file(link))
    .map_err(|e| LinkError::Remove {
      path: link.to_path_buf(),
      source: e,
    })
}
