//! Implementation of the `prism workspaces` command.

use std::process::ExitCode;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use prism_lib::CheckKind;
use prism_lib::workspace::{discover_from_manifest, is_eligible};

use super::Session;
use crate::output::{print_info, symbols};

pub fn cmd_workspaces(session: &Session) -> Result<ExitCode> {
  let root = session.ctx.project_root();
  let entries = discover_from_manifest(root).context("Failed to discover workspaces")?;

  if entries.is_empty() {
    print_info(&format!("No workspaces declared in {}", root.display()));
    return Ok(ExitCode::SUCCESS);
  }

  for entry in &entries {
    let checks: Vec<_> = [CheckKind::Typecheck, CheckKind::Test]
      .into_iter()
      .filter(|check| is_eligible(entry, *check))
      .map(|check| check.as_str())
      .collect();

    let note = if !entry.path.is_dir() {
      "missing".to_string()
    } else if checks.is_empty() {
      "no checks".to_string()
    } else {
      checks.join(", ")
    };

    println!(
      "  {} {} {}",
      symbols::INFO,
      entry.name,
      format!("({})", note).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  Ok(ExitCode::SUCCESS)
}
