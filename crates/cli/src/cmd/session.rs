//! Per-invocation state shared by every command.
//!
//! The mount context is resolved once, from the directory holding the running
//! executable and the working directory, and never recomputed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use prism_lib::{MountContext, PrismConfig};

pub struct Session {
  pub ctx: MountContext,
  pub config: PrismConfig,
}

impl Session {
  pub fn load() -> Result<Self> {
    let tool_dir = tool_dir()?;
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);

    let ctx = MountContext::resolve(&tool_dir, &cwd)?;
    debug!(kind = %ctx.kind(), root = %ctx.self_root().display(), "resolved mount context");

    let config = PrismConfig::load(ctx.self_root())?;
    Ok(Self { ctx, config })
  }
}

/// Directory containing the running `prism` executable.
fn tool_dir() -> Result<PathBuf> {
  let exe = std::env::current_exe().context("Failed to locate the prism executable")?;
  let exe = dunce::canonicalize(&exe).unwrap_or(exe);
  exe
    .parent()
    .map(PathBuf::from)
    .context("The prism executable has no parent directory")
}
