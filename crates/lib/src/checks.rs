//! Per-workspace check commands for the workspace-scan mode.

use crate::config::PrismConfig;
use crate::consts::TEST_SCRIPT;
use crate::context::MountContext;
use crate::runner::CommandSpec;
use crate::workspace::{self, CheckKind, DiscoveryError, TestRunner, WorkspaceEntry};

/// Discover the project's workspaces and keep those eligible for `check`.
pub fn eligible_workspaces(ctx: &MountContext, check: CheckKind) -> Result<Vec<WorkspaceEntry>, DiscoveryError> {
  let entries = workspace::discover_from_manifest(ctx.project_root())?;
  Ok(workspace::eligible(entries, check))
}

/// The command running `check` inside `entry`.
pub fn check_command(check: CheckKind, entry: &WorkspaceEntry, config: &PrismConfig) -> CommandSpec {
  let pm = config.package_manager;
  let parts = match check {
    CheckKind::Typecheck => pm.exec_args("tsc", &["--noEmit"]),
    CheckKind::Test => match workspace::detect_test_runner(entry) {
      Some(TestRunner::Vitest) => pm.exec_args("vitest", &["run"]),
      Some(TestRunner::Jest) => pm.exec_args("jest", &[]),
      Some(TestRunner::Playwright) => pm.exec_args("playwright", &["test"]),
      Some(TestRunner::Script) | None => pm.run_script_args(TEST_SCRIPT),
    },
  };
  CommandSpec::from_parts(parts, &entry.path)
}
