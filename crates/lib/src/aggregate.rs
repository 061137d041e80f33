//! Workspace-scan execution.
//!
//! Runs one command per workspace. Workspaces are independent, so a failure in
//! one never stops the others; the scan only reports whether any failed.
//! Failing to launch a command at all is still fatal.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::runner::{CommandRunner, CommandSpec, RunError};
use crate::workspace::WorkspaceEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceResult {
  pub workspace: String,
  pub path: PathBuf,
  pub exit_code: Option<i32>,
  pub succeeded: bool,
  pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
  pub results: Vec<WorkspaceResult>,
  pub any_failed: bool,
}

impl ScanReport {
  pub fn failed(&self) -> impl Iterator<Item = &WorkspaceResult> {
    self.results.iter().filter(|r| !r.succeeded)
  }
}

/// Progress notifications emitted while scanning.
#[derive(Debug, Clone, Copy)]
pub enum ScanEvent<'a> {
  Started {
    entry: &'a WorkspaceEntry,
    command: &'a CommandSpec,
  },
  Finished {
    result: &'a WorkspaceResult,
  },
}

/// Run `command_for(entry)` for every entry, in order, regardless of failures.
pub async fn scan<R, C>(entries: &[WorkspaceEntry], command_for: C, runner: &R) -> Result<ScanReport, RunError>
where
  R: CommandRunner,
  C: Fn(&WorkspaceEntry) -> CommandSpec,
{
  scan_with(entries, command_for, runner, |_| {}).await
}

/// Like [`scan`], reporting progress through `on_event`.
pub async fn scan_with<R, C, F>(
  entries: &[WorkspaceEntry],
  command_for: C,
  runner: &R,
  mut on_event: F,
) -> Result<ScanReport, RunError>
where
  R: CommandRunner,
  C: Fn(&WorkspaceEntry) -> CommandSpec,
  F: FnMut(ScanEvent<'_>),
{
  let mut report = ScanReport::default();

  for entry in entries {
    let command = command_for(entry);
    on_event(ScanEvent::Started {
      entry,
      command: &command,
    });

    let start = Instant::now();
    let status = runner.run(&command).await?;
    let result = WorkspaceResult {
      workspace: entry.name.clone(),
      path: entry.path.clone(),
      exit_code: status.code,
      succeeded: status.succeeded(),
      duration: start.elapsed(),
    };

    if result.succeeded {
      info!(workspace = %entry.name, "workspace passed");
    } else {
      warn!(workspace = %entry.name, code = ?status.code, "workspace failed, continuing");
      report.any_failed = true;
    }

    on_event(ScanEvent::Finished { result: &result });
    report.results.push(result);
  }

  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::runner::testing::RecordingRunner;
  use std::path::Path;

  fn entries(names: &[&str]) -> Vec<WorkspaceEntry> {
    names
      .iter()
      .map(|name| WorkspaceEntry {
        path: Path::new("/repo").join(name),
        name: name.to_string(),
      })
      .collect()
  }

  fn tsc(entry: &WorkspaceEntry) -> CommandSpec {
    CommandSpec::new(
      "bunx",
      vec!["tsc".to_string(), "--noEmit".to_string(), entry.name.clone()],
      &entry.path,
    )
  }

  #[tokio::test]
  async fn failure_in_the_middle_does_not_stop_the_scan() {
    let runner = RecordingRunner::new().fail("bunx tsc --noEmit apps/api", 2);
    let workspaces = entries(&["apps/web", "apps/api", "libs/ui"]);

    let report = scan(&workspaces, tsc, &runner).await.unwrap();

    assert_eq!(runner.call_count(), 3);
    assert!(report.any_failed);
    let failed: Vec<_> = report.failed().map(|r| r.workspace.as_str()).collect();
    assert_eq!(failed, ["apps/api"]);
    assert_eq!(report.results[1].exit_code, Some(2));
  }

  #[tokio::test]
  async fn commands_run_in_each_workspace() {
    let runner = RecordingRunner::new();
    let workspaces = entries(&["a", "b"]);

    let report = scan(&workspaces, tsc, &runner).await.unwrap();

    assert!(!report.any_failed);
    let cwds: Vec<_> = runner.calls.borrow().iter().map(|c| c.cwd.clone()).collect();
    assert_eq!(cwds, [PathBuf::from("/repo/a"), PathBuf::from("/repo/b")]);
  }

  #[tokio::test]
  async fn no_workspaces_is_success() {
    let runner = RecordingRunner::new();
    let report = scan(&[], tsc, &runner).await.unwrap();

    assert!(!report.any_failed);
    assert_eq!(runner.call_count(), 0);
  }

  #[tokio::test]
  async fn spawn_fault_aborts_the_scan() {
    let runner = RecordingRunner::new().fault("bunx");
    let workspaces = entries(&["a", "b"]);

    let err = scan(&workspaces, tsc, &runner).await.unwrap_err();

    assert!(matches!(err, RunError::Spawn { .. }));
    assert_eq!(runner.call_count(), 1);
  }

  #[tokio::test]
  async fn events_report_each_workspace() {
    let runner = RecordingRunner::new().fail("bunx tsc --noEmit b", 1);
    let workspaces = entries(&["a", "b"]);
    let mut finished = Vec::new();

    scan_with(&workspaces, tsc, &runner, |event| {
      if let ScanEvent::Finished { result } = event {
        finished.push((result.workspace.clone(), result.succeeded));
      }
    })
    .await
    .unwrap();

    assert_eq!(finished, [("a".to_string(), true), ("b".to_string(), false)]);
  }
}
