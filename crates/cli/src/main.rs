use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prism_lib::CheckKind;
use prism_lib::sync::SyncMode;

mod cmd;
mod output;

use cmd::{Session, cmd_check, cmd_info, cmd_quality, cmd_sync, cmd_workspaces};
use output::print_error;

/// prism - quality checks and subtree sync for JS/TS monorepos
#[derive(Parser)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the quality scripts for the host project, then for prism itself
  Quality,

  /// Pull the prism subtree, verify scripts, link commands and install dependencies
  Sync,

  /// Like `sync`, without installing dependencies
  SyncCommands,

  /// Typecheck every workspace that has a tsconfig.json
  Typecheck,

  /// Run tests in every workspace that has a test runner
  Test,

  /// Show how prism is mounted and the configuration in effect
  Info,

  /// List workspaces and the checks they are eligible for
  Workspaces,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  let result = Session::load().and_then(|session| match cli.command {
    Commands::Quality => cmd_quality(&session),
    Commands::Sync => cmd_sync(&session, SyncMode::Full),
    Commands::SyncCommands => cmd_sync(&session, SyncMode::CommandsOnly),
    Commands::Typecheck => cmd_check(&session, CheckKind::Typecheck),
    Commands::Test => cmd_check(&session, CheckKind::Test),
    Commands::Info => cmd_info(&session),
    Commands::Workspaces => cmd_workspaces(&session),
  });

  match result {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
