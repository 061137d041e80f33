//! Shared script verification.
//!
//! A host project exposes subtree tooling through entries in its manifest's
//! script table, e.g. `"quality": "prism/bin/prism quality"`. After the subtree
//! is pulled, every such entry must still point at a file that exists.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::manifest::{ManifestError, PackageManifest};

/// Characters that separate words in a script command.
const SHELL_OPERATORS: &[char] = &['&', '|', ';', '>', '<', '(', ')'];

#[derive(Debug, Error)]
pub enum ScriptsError {
  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error("{} script(s) reference missing subtree files: {}", .0.len(), format_dangling(.0))]
  Dangling(Vec<DanglingScript>),
}

/// A host script pointing at a subtree path that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingScript {
  pub script: String,
  pub path: String,
}

/// Inputs for [`verify_scripts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptsSpec {
  pub host_root: PathBuf,
  /// Subtree location relative to the host root.
  pub subtree_prefix: PathBuf,
}

/// Number of host scripts found referencing the subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptsReport {
  pub checked: usize,
}

/// Check every host script that references a path under the subtree.
///
/// A host without a manifest has nothing to check.
pub fn verify_scripts(spec: &ScriptsSpec) -> Result<ScriptsReport, ScriptsError> {
  let Some(manifest) = PackageManifest::load_from_dir(&spec.host_root)? else {
    debug!(host = %spec.host_root.display(), "host has no manifest, no scripts to verify");
    return Ok(ScriptsReport { checked: 0 });
  };

  let prefix = spec.subtree_prefix.to_string_lossy().replace('\\', "/");
  let mut checked = 0;
  let mut dangling = Vec::new();

  for (name, command) in &manifest.scripts {
    let references = subtree_references(command, &prefix);
    if references.is_empty() {
      continue;
    }
    checked += 1;

    for reference in references {
      if !spec.host_root.join(reference).exists() {
        dangling.push(DanglingScript {
          script: name.clone(),
          path: reference.to_string(),
        });
      }
    }
  }

  if !dangling.is_empty() {
    return Err(ScriptsError::Dangling(dangling));
  }

  Ok(ScriptsReport { checked })
}

/// Tokens of `command` that are paths inside the subtree.
///
/// Shell operators end a token even without surrounding whitespace.
fn subtree_references<'a>(command: &'a str, prefix: &str) -> Vec<&'a str> {
  command
    .split(|c: char| c.is_whitespace() || SHELL_OPERATORS.contains(&c))
    .map(|token| token.trim_matches(|c| c == '"' || c == '\'').trim_start_matches("./"))
    .filter(|token| {
      token
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    })
    .collect()
}

fn format_dangling(dangling: &[DanglingScript]) -> String {
  dangling
    .iter()
    .map(|d| format!("{} -> {}", d.script, d.path))
    .collect::<Vec<_>>()
    .join(", ")
}
