//! External command execution.
//!
//! Commands run with inherited standard streams so their output interleaves live
//! with ours. A nonzero exit is an ordinary result; only failing to launch the
//! process at all is an error.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RunError {
  /// The executable could not be launched (not found, not permitted, bad cwd).
  #[error("failed to spawn '{program}' in {}: {source}", cwd.display())]
  Spawn {
    program: String,
    cwd: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args,
      cwd: cwd.into(),
    }
  }

  /// Build from a `(program, args)` pair as returned by the package manager helpers.
  pub fn from_parts(parts: (&str, Vec<String>), cwd: &Path) -> Self {
    Self::new(parts.0, parts.1, cwd)
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
  /// Exit code, `None` when the process was terminated by a signal.
  pub code: Option<i32>,
}

impl CommandStatus {
  pub fn succeeded(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs commands to completion.
///
/// Implemented by [`ProcessRunner`] for real processes; tests substitute
/// recording fakes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  async fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, RunError>;
}

/// Spawns real child processes and waits for them, with no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  async fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, RunError> {
    info!(cmd = %spec, cwd = %spec.cwd.display(), "running command");

    let status = Command::new(&spec.program)
      .args(&spec.args)
      .current_dir(&spec.cwd)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .await
      .map_err(|e| RunError::Spawn {
        program: spec.program.clone(),
        cwd: spec.cwd.clone(),
        source: e,
      })?;

    debug!(cmd = %spec, code = ?status.code(), "command exited");

    Ok(CommandStatus { code: status.code() })
  }
}
