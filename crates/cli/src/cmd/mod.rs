mod check;
mod info;
mod quality;
mod session;
mod sync;
mod workspaces;

pub use check::cmd_check;
pub use info::cmd_info;
pub use quality::cmd_quality;
pub use session::Session;
pub use sync::cmd_sync;
pub use workspaces::cmd_workspaces;

use std::process::ExitCode;

use anyhow::{Context, Result};

use prism_lib::{Pipeline, PipelineEvent, PipelineReport, ProcessRunner};

use crate::output::{print_error, print_header, print_step, print_step_result, print_success};

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}

/// Run `pipeline` with live progress output.
pub(crate) fn run_pipeline(pipeline: &Pipeline) -> Result<PipelineReport> {
  let rt = runtime()?;
  let report = rt.block_on(pipeline.run_with(&ProcessRunner, |event| match event {
    PipelineEvent::StageStarted { stage } => print_header(&stage.name),
    PipelineEvent::StepStarted { step, .. } => print_step(&step.name, &step.action.to_string()),
    PipelineEvent::StepFinished { result, .. } => {
      print_step_result(&result.step, result.succeeded, result.duration, result.detail.as_deref())
    }
  }))?;
  Ok(report)
}

/// Print the closing line for a pipeline run and map it to an exit code.
pub(crate) fn finish(label: &str, report: &PipelineReport) -> ExitCode {
  println!();
  match &report.aborted {
    None => {
      print_success(&format!("{} passed", label));
      ExitCode::SUCCESS
    }
    Some(abort) => {
      let mut message = format!("{} failed at {} / {}", label, abort.stage, abort.step);
      if let Some(detail) = &abort.detail {
        message.push_str(&format!(": {}", detail));
      }
      print_error(&message);
      ExitCode::FAILURE
    }
  }
}
