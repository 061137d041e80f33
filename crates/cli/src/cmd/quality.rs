//! Implementation of the `prism quality` command.

use std::process::ExitCode;

use anyhow::Result;

use prism_lib::quality::quality_pipeline;

use super::{Session, finish, run_pipeline};
use crate::output::{print_info, print_warning};

/// Run the quality chain for the host project (when embedded), then for prism.
///
/// A missing manifest skips that project with a note. Exits non-zero as soon
/// as any script fails; later scripts and stages do not run.
pub fn cmd_quality(session: &Session) -> Result<ExitCode> {
  let plan = quality_pipeline(&session.ctx, &session.config);

  for note in &plan.skipped {
    print_info(note);
  }

  if plan.pipeline.is_empty() {
    print_warning("Nothing to check");
    return Ok(ExitCode::SUCCESS);
  }

  let report = run_pipeline(&plan.pipeline)?;
  Ok(finish("Quality checks", &report))
}
