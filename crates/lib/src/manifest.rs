//! Project manifest (`package.json`) model.
//!
//! Only the fields the tooling reads are modelled: the package name, the
//! declared workspace patterns, and the script table.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::consts::MANIFEST_FILE;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// The `workspaces` field, either a bare list or `{ "packages": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WorkspacesField {
  List(Vec<String>),
  Object {
    #[serde(default)]
    packages: Vec<String>,
  },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  workspaces: Option<WorkspacesField>,
  #[serde(default)]
  pub scripts: BTreeMap<String, String>,
}

impl PackageManifest {
  /// Parse a manifest from its JSON text.
  pub fn from_json(path: &Path, content: &str) -> Result<Self, ManifestError> {
    serde_json::from_str(content).map_err(|e| ManifestError::Parse {
      path: path.to_path_buf(),
      source: e,
    })
  }

  /// Load the manifest file at `path`.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::from_json(path, &content)
  }

  /// Load the manifest of `dir`, or `None` if the directory has none.
  pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, ManifestError> {
    let path = manifest_path(dir);
    if !path.is_file() {
      return Ok(None);
    }
    Self::load(&path).map(Some)
  }

  /// Workspace patterns in declaration order.
  pub fn workspace_patterns(&self) -> &[String] {
    match &self.workspaces {
      Some(WorkspacesField::List(patterns)) => patterns,
      Some(WorkspacesField::Object { packages }) => packages,
      None => &[],
    }
  }

  pub fn has_script(&self, name: &str) -> bool {
    self.scripts.contains_key(name)
  }
}

/// Path of the manifest file inside `dir`.
pub fn manifest_path(dir: &Path) -> PathBuf {
  dir.join(MANIFEST_FILE)
}

/// Whether `dir` carries a manifest.
pub fn has_manifest(dir: &Path) -> bool {
  manifest_path(dir).is_file()
}
