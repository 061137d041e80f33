//! Tool configuration.
//!
//! Read from an optional `prism.json` in the tooling root. Every key has a
//! default, so an absent file is equivalent to `{}`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::CONFIG_FILE;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// Package manager used to run scripts, binaries and installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
  #[default]
  Bun,
  Npm,
  Pnpm,
  Yarn,
}

impl PackageManager {
  pub fn program(&self) -> &'static str {
    match self {
      Self::Bun => "bun",
      Self::Npm => "npm",
      Self::Pnpm => "pnpm",
      Self::Yarn => "yarn",
    }
  }

  /// Arguments running a manifest script.
  pub fn run_script_args(&self, script: &str) -> (&'static str, Vec<String>) {
    (self.program(), vec!["run".to_string(), script.to_string()])
  }

  /// Arguments executing a locally installed package binary.
  pub fn exec_args(&self, bin: &str, args: &[&str]) -> (&'static str, Vec<String>) {
    let (program, mut prefix) = match self {
      Self::Bun => ("bunx", Vec::new()),
      Self::Npm => ("npx", vec!["--no-install".to_string()]),
      Self::Pnpm => ("pnpm", vec!["exec".to_string()]),
      Self::Yarn => ("yarn", Vec::new()),
    };
    prefix.push(bin.to_string());
    prefix.extend(args.iter().map(|a| a.to_string()));
    (program, prefix)
  }

  pub fn install_args(&self) -> (&'static str, Vec<String>) {
    (self.program(), vec!["install".to_string()])
  }
}

impl fmt::Display for PackageManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program())
  }
}

/// Where the subtree is pulled from during sync.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubtreeConfig {
  pub remote: String,
  pub branch: String,
}

impl Default for SubtreeConfig {
  fn default() -> Self {
    Self {
      remote: "prism".to_string(),
      branch: "main".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrismConfig {
  pub package_manager: PackageManager,
  /// Command directory, relative to both the host and subtree roots.
  pub commands_dir: PathBuf,
  /// Scripts making up the quality chain, in order.
  pub quality_scripts: Vec<String>,
  pub subtree: SubtreeConfig,
}

impl Default for PrismConfig {
  fn default() -> Self {
    Self {
      package_manager: PackageManager::default(),
      commands_dir: PathBuf::from(".claude").join("commands"),
      quality_scripts: ["typecheck", "lint", "format", "test"]
        .into_iter()
        .map(String::from)
        .collect(),
      subtree: SubtreeConfig::default(),
    }
  }
}

impl PrismConfig {
  /// Load `prism.json` from `root`, falling back to defaults when absent.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
      debug!(path = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
      path: path.clone(),
      source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse { path, source: e })
  }
}
