//! Workspace scans driven by real shell commands.

use prism_lib::{ProcessRunner, WorkspaceEntry, scan};
use tempfile::TempDir;

use super::common::{entry, sh};

#[tokio::test]
async fn every_workspace_runs_despite_failures() {
  let temp = TempDir::new().unwrap();
  let root = temp.path();
  let workspaces = vec![entry(root, "apps/web"), entry(root, "apps/api"), entry(root, "libs/ui")];

  let command = |e: &WorkspaceEntry| {
    if e.name == "apps/api" {
      sh("touch ran; exit 1", &e.path)
    } else {
      sh("touch ran", &e.path)
    }
  };
  let report = scan(&workspaces, command, &ProcessRunner).await.unwrap();

  assert!(report.any_failed);
  for workspace in &workspaces {
    assert!(workspace.path.join("ran").exists(), "{} did not run", workspace.name);
  }
  let failed: Vec<_> = report.failed().map(|r| r.workspace.as_str()).collect();
  assert_eq!(failed, ["apps/api"]);
}

#[tokio::test]
async fn all_passing_is_success() {
  let temp = TempDir::new().unwrap();
  let workspaces = vec![entry(temp.path(), "a"), entry(temp.path(), "b")];

  let report = scan(&workspaces, |e| sh("true", &e.path), &ProcessRunner).await.unwrap();

  assert!(!report.any_failed);
  assert!(report.results.iter().all(|r| r.exit_code == Some(0)));
}
