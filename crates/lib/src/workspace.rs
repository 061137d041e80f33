//! Workspace discovery and check eligibility.
//!
//! Workspaces are declared in the root manifest as an ordered list of patterns.
//! A pattern is either a literal relative path or a base path ending in `/*`,
//! which expands to every immediate, non-hidden subdirectory of the base.
//!
//! All "does this workspace take part in check X" predicates live here so the
//! aggregator and pipelines share one notion of eligibility.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::{TEST_SCRIPT, TSCONFIG_FILE};
use crate::manifest::{ManifestError, PackageManifest};

/// Marker a wildcard pattern ends with.
const WILDCARD_SUFFIX: &str = "/*";

/// Extensions accepted for test-runner configuration files.
const CONFIG_EXTENSIONS: &[&str] = &["ts", "mts", "cts", "js", "mjs", "cjs", "json"];

#[derive(Debug, Error)]
pub enum DiscoveryError {
  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error("failed to list workspace directory {}: {source}", path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A declared workspace pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacePattern {
  /// A single workspace at a relative path.
  Literal(String),
  /// Every immediate, non-hidden subdirectory of `base`.
  Wildcard { base: String },
}

impl WorkspacePattern {
  pub fn parse(raw: &str) -> Self {
    let trimmed = raw.trim().trim_start_matches("./").trim_end_matches('/');

    if trimmed == "*" {
      return Self::Wildcard { base: String::new() };
    }

    match trimmed.strip_suffix(WILDCARD_SUFFIX) {
      Some(base) => Self::Wildcard {
        base: base.trim_end_matches('/').to_string(),
      },
      None => Self::Literal(trimmed.to_string()),
    }
  }
}

impl fmt::Display for WorkspacePattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(path) => write!(f, "{}", path),
      Self::Wildcard { base } if base.is_empty() => write!(f, "*"),
      Self::Wildcard { base } => write!(f, "{}{}", base, WILDCARD_SUFFIX),
    }
  }
}

/// A resolved workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
  /// Absolute path. Not guaranteed to exist for literal patterns.
  pub path: PathBuf,
  /// Root-relative path with `/` separators, e.g. `apps/web`.
  pub name: String,
}

/// Checks a workspace can take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
  Test,
  Typecheck,
}

impl CheckKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Test => "test",
      Self::Typecheck => "typecheck",
    }
  }
}

impl fmt::Display for CheckKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// How a workspace's tests are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestRunner {
  /// The workspace manifest declares a `test` script.
  Script,
  Vitest,
  Jest,
  Playwright,
}

impl TestRunner {
  /// Config file stems identifying each runner, in detection order.
  const CONFIG_STEMS: &'static [(&'static str, TestRunner)] = &[
    ("vitest.config", TestRunner::Vitest),
    ("vitest.workspace", TestRunner::Vitest),
    ("jest.config", TestRunner::Jest),
    ("playwright.config", TestRunner::Playwright),
  ];
}

/// Expand `patterns` against `root`, preserving declaration order.
///
/// Wildcard expansions are sorted by directory name. A wildcard whose base does
/// not exist contributes nothing.
pub fn discover(root: &Path, patterns: &[WorkspacePattern]) -> Result<Vec<WorkspaceEntry>, DiscoveryError> {
  let mut entries = Vec::new();

  for pattern in patterns {
    match pattern {
      WorkspacePattern::Literal(relative) if relative.is_empty() => {
        debug!(root = %root.display(), "empty workspace pattern, skipping");
      }
      WorkspacePattern::Literal(relative) => entries.push(WorkspaceEntry {
        path: root.join(relative),
        name: relative.clone(),
      }),
      WorkspacePattern::Wildcard { base } => entries.extend(expand_wildcard(root, base)?),
    }
  }

  Ok(entries)
}

/// Discover the workspaces declared by the manifest at `root`.
///
/// A root without a manifest declares no workspaces.
pub fn discover_from_manifest(root: &Path) -> Result<Vec<WorkspaceEntry>, DiscoveryError> {
  let Some(manifest) = PackageManifest::load_from_dir(root)? else {
    debug!(root = %root.display(), "no root manifest, no workspaces");
    return Ok(Vec::new());
  };

  let patterns: Vec<_> = manifest
    .workspace_patterns()
    .iter()
    .map(|raw| WorkspacePattern::parse(raw))
    .collect();

  discover(root, &patterns)
}

fn expand_wildcard(root: &Path, base: &str) -> Result<Vec<WorkspaceEntry>, DiscoveryError> {
  let dir = if base.is_empty() { root.to_path_buf() } else { root.join(base) };

  if !dir.is_dir() {
    debug!(base = %dir.display(), "wildcard base missing, skipping");
    return Ok(Vec::new());
  }

  let read_err = |e| DiscoveryError::ReadDir {
    path: dir.clone(),
    source: e,
  };

  let mut entries = Vec::new();
  for entry in fs::read_dir(&dir).map_err(read_err)? {
    let entry = entry.map_err(read_err)?;
    let name = entry.file_name().to_string_lossy().to_string();
    let path = entry.path();
    if name.starts_with('.') || !path.is_dir() {
      continue;
    }
    entries.push(WorkspaceEntry {
      path,
      name: if base.is_empty() { name } else { format!("{}/{}", base, name) },
    });
  }
  entries.sort_by(|a, b| a.name.cmp(&b.name));

  Ok(entries)
}

/// Whether `entry` takes part in `check`.
pub fn is_eligible(entry: &WorkspaceEntry, check: CheckKind) -> bool {
  match check {
    CheckKind::Typecheck => entry.path.join(TSCONFIG_FILE).is_file(),
    CheckKind::Test => detect_test_runner(entry).is_some(),
  }
}

/// Keep only the entries eligible for `check`.
pub fn eligible(entries: Vec<WorkspaceEntry>, check: CheckKind) -> Vec<WorkspaceEntry> {
  entries
    .into_iter()
    .filter(|entry| {
      let keep = is_eligible(entry, check);
      if !keep {
        debug!(workspace = %entry.name, check = %check, "workspace not eligible, skipping");
      }
      keep
    })
    .collect()
}

/// Determine how `entry` runs its tests.
///
/// A declared `test` script wins over runner config files.
pub fn detect_test_runner(entry: &WorkspaceEntry) -> Option<TestRunner> {
  match PackageManifest::load_from_dir(&entry.path) {
    Ok(Some(manifest)) if manifest.has_script(TEST_SCRIPT) => return Some(TestRunner::Script),
    Ok(_) => {}
    Err(e) => warn!(workspace = %entry.name, error = %e, "unreadable workspace manifest"),
  }

  TestRunner::CONFIG_STEMS.iter().find_map(|(stem, runner)| {
    CONFIG_EXTENSIONS
      .iter()
      .any(|ext| entry.path.join(format!("{}.{}", stem, ext)).is_file())
      .then_some(*runner)
  })
}
