//! Implementation of the `prism sync` and `prism sync-commands` commands.

use std::process::ExitCode;

use anyhow::Result;

use prism_lib::sync::{SyncMode, sync_pipeline};

use super::{Session, finish, run_pipeline};

pub fn cmd_sync(session: &Session, mode: SyncMode) -> Result<ExitCode> {
  let pipeline = sync_pipeline(&session.ctx, &session.config, mode)?;
  let report = run_pipeline(&pipeline)?;

  let label = match mode {
    SyncMode::Full => "Sync",
    SyncMode::CommandsOnly => "Command sync",
  };
  Ok(finish(label, &report))
}
