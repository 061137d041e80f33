//! Implementation of the `prism typecheck` and `prism test` commands.
//!
//! Every eligible workspace is checked even when an earlier one fails; the exit
//! code reflects whether any failed.

use std::process::ExitCode;

use anyhow::{Context, Result};

use prism_lib::checks::{check_command, eligible_workspaces};
use prism_lib::{CheckKind, ProcessRunner, ScanEvent, scan_with};

use super::{Session, runtime};
use crate::output::{print_error, print_header, print_info, print_step, print_step_result, print_success};

pub fn cmd_check(session: &Session, check: CheckKind) -> Result<ExitCode> {
  let entries = eligible_workspaces(&session.ctx, check).context("Failed to discover workspaces")?;

  if entries.is_empty() {
    print_info(&format!("No workspaces eligible for {}", check));
    return Ok(ExitCode::SUCCESS);
  }

  print_header(&format!("{} {} workspace(s)", check, entries.len()));

  let config = &session.config;
  let rt = runtime()?;
  let report = rt.block_on(scan_with(
    &entries,
    |entry| check_command(check, entry, config),
    &ProcessRunner,
    |event| match event {
      ScanEvent::Started { entry, command } => print_step(&entry.name, &command.to_string()),
      ScanEvent::Finished { result } => {
        print_step_result(&result.workspace, result.succeeded, result.duration, None)
      }
    },
  ))?;

  println!();
  if report.any_failed {
    let failed: Vec<_> = report.failed().map(|r| r.workspace.as_str()).collect();
    print_error(&format!(
      "{} failed in {} of {} workspace(s): {}",
      check,
      failed.len(),
      report.results.len(),
      failed.join(", ")
    ));
    Ok(ExitCode::FAILURE)
  } else {
    print_success(&format!("{} passed in {} workspace(s)", check, report.results.len()));
    Ok(ExitCode::SUCCESS)
  }
}
