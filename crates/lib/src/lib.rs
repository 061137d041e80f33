//! prism-lib: workspace orchestration for the prism tooling subtree
//!
//! This crate provides the building blocks behind the `prism` binary:
//! - `MountContext`: whether the tooling runs embedded in a host project or standalone
//! - workspace discovery and per-check eligibility
//! - `Pipeline`: fail-fast staged execution (quality, sync)
//! - `scan`: continue-on-failure execution across workspaces
//! - `ensure_link`: idempotent relative symlinks from the host to the subtree

pub mod aggregate;
pub mod checks;
pub mod config;
pub mod consts;
pub mod context;
pub mod link;
pub mod manifest;
pub mod pipeline;
pub mod quality;
pub mod runner;
pub mod scripts;
pub mod sync;
mod util;
pub mod workspace;

pub use aggregate::{ScanEvent, ScanReport, WorkspaceResult, scan, scan_with};
pub use config::{ConfigError, PackageManager, PrismConfig};
pub use context::{ContextError, MountContext, MountKind};
pub use link::{LinkError, LinkOutcome, SymlinkState, ensure_link, symlink_supported};
pub use pipeline::{Pipeline, PipelineError, PipelineEvent, PipelineReport, Stage, Step, StepResult};
pub use runner::{CommandRunner, CommandSpec, CommandStatus, ProcessRunner, RunError};
pub use workspace::{CheckKind, DiscoveryError, WorkspaceEntry, WorkspacePattern};
