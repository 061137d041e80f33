//! Quality pipeline construction.
//!
//! When embedded, the host project is verified first and the subtree second;
//! the subtree stage never runs on top of a host that failed. Each stage runs
//! the configured quality scripts (`typecheck`, `lint`, `format`, `test` by
//! default) as one fail-fast chain.

use std::path::Path;

use tracing::{debug, info};

use crate::config::PrismConfig;
use crate::consts::MANIFEST_FILE;
use crate::context::MountContext;
use crate::manifest;
use crate::pipeline::{Pipeline, Stage, Step};
use crate::runner::CommandSpec;

pub const HOST_STAGE: &str = "host project";
pub const SUBTREE_STAGE: &str = "prism project";
pub const STANDALONE_STAGE: &str = "project";

/// The pipeline to run plus stages skipped as not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityPlan {
  pub pipeline: Pipeline,
  /// Informational notes for stages that were left out. Not failures.
  pub skipped: Vec<String>,
}

pub fn quality_pipeline(ctx: &MountContext, config: &PrismConfig) -> QualityPlan {
  let mut stages = Vec::new();
  let mut skipped = Vec::new();

  if let Some(host_root) = ctx.host_root() {
    if manifest::has_manifest(host_root) {
      stages.push(Stage::new(HOST_STAGE, quality_chain(host_root, config)));
    } else {
      debug!(host = %host_root.display(), "host has no manifest, skipping host stage");
    }
  }

  let local_stage = if ctx.is_embedded() { SUBTREE_STAGE } else { STANDALONE_STAGE };
  if manifest::has_manifest(ctx.self_root()) {
    stages.push(Stage::new(local_stage, quality_chain(ctx.self_root(), config)));
  } else {
    let note = format!(
      "no {} in {}, skipping {} checks",
      MANIFEST_FILE,
      ctx.self_root().display(),
      local_stage
    );
    info!("{}", note);
    skipped.push(note);
  }

  QualityPlan {
    pipeline: Pipeline::new(stages),
    skipped,
  }
}

/// The fail-fast chain of quality scripts run in `root`.
pub fn quality_chain(root: &Path, config: &PrismConfig) -> Vec<Step> {
  config
    .quality_scripts
    .iter()
    .map(|script| {
      let parts = config.package_manager.run_script_args(script);
      Step::command(script.as_str(), CommandSpec::from_parts(parts, root))
    })
    .collect()
}
