//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated host project with prism embedded as a subtree.
///
/// The built binary is copied to `<host>/prism/bin/prism` so that it resolves
/// an embedded mount context exactly like a real checkout would.
pub struct TestEnv {
  pub temp: TempDir,
  bin: PathBuf,
}

impl TestEnv {
  pub fn embedded() -> Self {
    let temp = TempDir::new().unwrap();
    let bin_dir = temp.path().join("host").join("prism").join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();

    let bin = bin_dir.join(format!("prism{}", std::env::consts::EXE_SUFFIX));
    std::fs::copy(env!("CARGO_BIN_EXE_prism"), &bin).unwrap();

    Self { temp, bin }
  }

  /// Host project root.
  pub fn host(&self) -> PathBuf {
    let p = self.temp.path().join("host");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Embedded subtree root.
  pub fn subtree(&self) -> PathBuf {
    self.host().join("prism")
  }

  /// Write a file relative to the host root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.host().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn mkdir(&self, relative_path: &str) -> PathBuf {
    let path = self.host().join(relative_path);
    std::fs::create_dir_all(&path).unwrap();
    path
  }

  /// A Command for the embedded binary, run from the host root.
  pub fn prism_cmd(&self) -> Command {
    self.prism_cmd_in(&self.host())
  }

  pub fn prism_cmd_in(&self, cwd: &Path) -> Command {
    let mut cmd = Command::new(&self.bin);
    cmd.current_dir(cwd);
    cmd
  }
}
