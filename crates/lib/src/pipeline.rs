//! Fail-fast staged execution.
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s, each an ordered list of
//! [`Step`]s. Stages represent dependent work: once a stage fails, later stages
//! never run. Within a stage, a failing step that aborts on failure ends the
//! stage immediately; a failing step that does not is recorded and the stage
//! carries on, but still counts as failed.
//!
//! Completed steps are never rolled back.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::link::{self, LinkError, LinkOutcome};
use crate::runner::{CommandRunner, CommandSpec, RunError};
use crate::scripts::{self, ScriptsSpec};

#[derive(Debug, Error)]
pub enum PipelineError {
  /// A command could not be launched. Fatal regardless of step settings.
  #[error(transparent)]
  Run(#[from] RunError),
}

/// Link a host path to a subtree directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
  pub link: PathBuf,
  pub target: PathBuf,
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Command(CommandSpec),
  Link(LinkSpec),
  VerifyScripts(ScriptsSpec),
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Command(spec) => write!(f, "{}", spec),
      Self::Link(spec) => write!(f, "link {} -> {}", spec.link.display(), spec.target.display()),
      Self::VerifyScripts(spec) => write!(f, "verify scripts in {}", spec.host_root.display()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  pub name: String,
  pub action: Action,
  pub abort_on_failure: bool,
}

impl Step {
  pub fn new(name: impl Into<String>, action: Action) -> Self {
    Self {
      name: name.into(),
      action,
      abort_on_failure: true,
    }
  }

  pub fn command(name: impl Into<String>, spec: CommandSpec) -> Self {
    Self::new(name, Action::Command(spec))
  }

  pub fn link(name: impl Into<String>, link: PathBuf, target: PathBuf) -> Self {
    Self::new(name, Action::Link(LinkSpec { link, target }))
  }

  pub fn verify_scripts(name: impl Into<String>, spec: ScriptsSpec) -> Self {
    Self::new(name, Action::VerifyScripts(spec))
  }

  /// Record a failure of this step without ending its stage.
  pub fn continue_on_failure(mut self) -> Self {
    self.abort_on_failure = false;
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
  pub name: String,
  pub steps: Vec<Step>,
}

impl Stage {
  pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
    Self {
      name: name.into(),
      steps,
    }
  }
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
  pub step: String,
  /// Exit code for command steps; `None` for built-in steps or signal exits.
  pub exit_code: Option<i32>,
  pub succeeded: bool,
  /// Human-readable note: failure reason or what a built-in step did.
  pub detail: Option<String>,
  pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
  pub name: String,
  pub results: Vec<StepResult>,
  pub succeeded: bool,
}

impl StageReport {
  /// First failed step of the stage, if any.
  pub fn failed_step(&self) -> Option<&StepResult> {
    self.results.iter().find(|r| !r.succeeded)
  }
}

/// Where a pipeline stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortPoint {
  pub stage: String,
  pub step: String,
  pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
  pub stages: Vec<StageReport>,
  pub aborted: Option<AbortPoint>,
}

impl PipelineReport {
  pub fn succeeded(&self) -> bool {
    self.aborted.is_none()
  }

  /// Names of every step that ran, as `stage/step`, in execution order.
  pub fn executed_steps(&self) -> Vec<String> {
    self
      .stages
      .iter()
      .flat_map(|stage| stage.results.iter().map(move |r| format!("{}/{}", stage.name, r.step)))
      .collect()
  }
}

/// Progress notifications emitted while a pipeline runs.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
  StageStarted { stage: &'a Stage },
  StepStarted { stage: &'a Stage, step: &'a Step },
  StepFinished { stage: &'a Stage, result: &'a StepResult },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
  stages: Vec<Stage>,
}

impl Pipeline {
  pub fn new(stages: Vec<Stage>) -> Self {
    Self { stages }
  }

  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Run every stage in order, stopping at the first failed stage.
  pub async fn run<R: CommandRunner>(&self, runner: &R) -> Result<PipelineReport, PipelineError> {
    self.run_with(runner, |_| {}).await
  }

  /// Like [`Pipeline::run`], reporting progress through `on_event`.
  pub async fn run_with<R, F>(&self, runner: &R, mut on_event: F) -> Result<PipelineReport, PipelineError>
  where
    R: CommandRunner,
    F: FnMut(PipelineEvent<'_>),
  {
    let mut report = PipelineReport::default();

    for stage in &self.stages {
      info!(stage = %stage.name, steps = stage.steps.len(), "starting stage");
      on_event(PipelineEvent::StageStarted { stage });

      let stage_report = run_stage(stage, runner, &mut on_event).await?;
      let failed = stage_report
        .failed_step()
        .map(|r| (r.step.clone(), r.detail.clone()));
      report.stages.push(stage_report);

      if let Some((step, detail)) = failed {
        warn!(stage = %stage.name, step = %step, "stage failed, aborting pipeline");
        report.aborted = Some(AbortPoint {
          stage: stage.name.clone(),
          step,
          detail,
        });
        break;
      }
    }

    Ok(report)
  }
}

async fn run_stage<R, F>(stage: &Stage, runner: &R, on_event: &mut F) -> Result<StageReport, PipelineError>
where
  R: CommandRunner,
  F: FnMut(PipelineEvent<'_>),
{
  let mut results = Vec::with_capacity(stage.steps.len());
  let mut succeeded = true;

  for step in &stage.steps {
    on_event(PipelineEvent::StepStarted { stage, step });

    let result = run_step(step, runner).await?;
    on_event(PipelineEvent::StepFinished {
      stage,
      result: &result,
    });

    let step_failed = !result.succeeded;
    results.push(result);

    if step_failed {
      succeeded = false;
      if step.abort_on_failure {
        debug!(stage = %stage.name, step = %step.name, "step failed, skipping rest of stage");
        break;
      }
    }
  }

  Ok(StageReport {
    name: stage.name.clone(),
    results,
    succeeded,
  })
}

async fn run_step<R: CommandRunner>(step: &Step, runner: &R) -> Result<StepResult, PipelineError> {
  let start = Instant::now();
  info!(step = %step.name, action = %step.action, "running step");

  let (exit_code, succeeded, detail) = match &step.action {
    Action::Command(spec) => {
      let status = runner.run(spec).await?;
      let detail = (!status.succeeded()).then(|| match status.code {
        Some(code) => format!("`{}` exited with code {}", spec, code),
        None => format!("`{}` was terminated by a signal", spec),
      });
      (status.code, status.succeeded(), detail)
    }
    Action::Link(spec) => match link::ensure_link(&spec.link, &spec.target) {
      Ok(outcome) => (None, true, Some(describe_link(&outcome, spec))),
      Err(e) => (None, false, Some(describe_link_error(&e, spec))),
    },
    Action::VerifyScripts(spec) => match scripts::verify_scripts(spec) {
      Ok(report) => (None, true, Some(format!("{} script(s) verified", report.checked))),
      Err(e) => (None, false, Some(e.to_string())),
    },
  };

  Ok(StepResult {
    step: step.name.clone(),
    exit_code,
    succeeded,
    detail,
    duration: start.elapsed(),
  })
}

fn describe_link(outcome: &LinkOutcome, spec: &LinkSpec) -> String {
  match outcome {
    LinkOutcome::Created => format!("linked {}", spec.link.display()),
    LinkOutcome::Unchanged => format!("{} already linked", spec.link.display()),
    LinkOutcome::Replaced { previous } => {
      format!("relinked {} (was -> {})", spec.link.display(), previous.display())
    }
  }
}

fn describe_link_error(err: &LinkError, spec: &LinkSpec) -> String {
  let probe_dir = spec.link.parent().filter(|p| p.is_dir());
  match (err, probe_dir) {
    (LinkError::CreateSymlink { .. }, Some(dir)) if !link::symlink_supported(dir) => format!(
      "{}; symlinks cannot be created here (on Windows, enable Developer Mode or run elevated)",
      err
    ),
    _ => err.to_string(),
  }
}
