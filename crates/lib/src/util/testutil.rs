//! Test utilities for prism-lib.
//!
//! Cross-platform helpers for tests that spawn shell commands or lay out
//! project trees on disk.

use std::fs;
use std::path::Path;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
}

/// Create the directory `root/relative` and its parents.
pub fn mkdir(root: &Path, relative: &str) {
  fs::create_dir_all(root.join(relative)).unwrap();
}
