//! Sync pipeline construction.
//!
//! Brings an embedded subtree up to date and re-wires the host project to it:
//!
//! 1. pull the subtree from its upstream repository
//! 2. verify host scripts that point into the subtree
//! 3. link the host command directory to the subtree's
//! 4. install dependencies in the host root
//! 5. install dependencies in the subtree root
//!
//! Every step depends on the previous one, so the first failure ends the sync.
//! The commands-only variant stops after step 3.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::PrismConfig;
use crate::consts::SUBTREE_DIR_NAME;
use crate::context::MountContext;
use crate::pipeline::{Pipeline, Stage, Step};
use crate::runner::CommandSpec;
use crate::scripts::ScriptsSpec;

pub const SYNC_STAGE: &str = "sync";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
  Full,
  /// Skip dependency installation.
  CommandsOnly,
}

#[derive(Debug, Error)]
pub enum SyncError {
  #[error(
    "sync needs a host project: run it from a '{}' subtree embedded in another repository (standalone at {})",
    SUBTREE_DIR_NAME,
    root.display()
  )]
  NotEmbedded { root: PathBuf },
}

pub fn sync_pipeline(ctx: &MountContext, config: &PrismConfig, mode: SyncMode) -> Result<Pipeline, SyncError> {
  let Some(host_root) = ctx.host_root() else {
    return Err(SyncError::NotEmbedded {
      root: ctx.self_root().to_path_buf(),
    });
  };
  let self_root = ctx.self_root();
  let prefix = ctx
    .subtree_prefix()
    .unwrap_or_else(|| PathBuf::from(SUBTREE_DIR_NAME));
  let pm = config.package_manager;

  let git_pull = CommandSpec::new(
    "git",
    vec![
      "subtree".to_string(),
      "pull".to_string(),
      format!("--prefix={}", prefix.to_string_lossy().replace('\\', "/")),
      config.subtree.remote.clone(),
      config.subtree.branch.clone(),
      "--squash".to_string(),
    ],
    host_root,
  );

  let mut steps = vec![
    Step::command("git", git_pull),
    Step::verify_scripts(
      "scripts",
      ScriptsSpec {
        host_root: host_root.to_path_buf(),
        subtree_prefix: prefix,
      },
    ),
    Step::link(
      "commands",
      host_root.join(&config.commands_dir),
      self_root.join(&config.commands_dir),
    ),
  ];

  if mode == SyncMode::Full {
    steps.push(Step::command(
      "install (host)",
      CommandSpec::from_parts(pm.install_args(), host_root),
    ));
    steps.push(Step::command(
      format!("install ({})", SUBTREE_DIR_NAME),
      CommandSpec::from_parts(pm.install_args(), self_root),
    ));
  }

  Ok(Pipeline::new(vec![Stage::new(SYNC_STAGE, steps)]))
}
