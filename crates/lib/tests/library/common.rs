//! Shared helpers for library tests.

use std::path::Path;

use prism_lib::{CommandSpec, WorkspaceEntry};

/// A `/bin/sh -c` command run in `cwd`.
pub fn sh(script: &str, cwd: &Path) -> CommandSpec {
  CommandSpec::new("/bin/sh", vec!["-c".to_string(), script.to_string()], cwd)
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, content).unwrap();
}

pub fn entry(root: &Path, name: &str) -> WorkspaceEntry {
  std::fs::create_dir_all(root.join(name)).unwrap();
  WorkspaceEntry {
    path: root.join(name),
    name: name.to_string(),
  }
}
