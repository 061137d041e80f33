//! Implementation of the `prism info` command.

use std::process::ExitCode;

use anyhow::Result;

use prism_lib::link::{SymlinkState, inspect, symlink_supported};

use super::Session;
use crate::output::{print_stat, print_success, print_warning};

pub fn cmd_info(session: &Session) -> Result<ExitCode> {
  let ctx = &session.ctx;
  let config = &session.config;

  print_success(&format!("prism v{} ({})", env!("CARGO_PKG_VERSION"), ctx.kind()));
  print_stat("Root", &ctx.self_root().display().to_string());
  if let Some(host_root) = ctx.host_root() {
    print_stat("Host", &host_root.display().to_string());
  }
  print_stat("Package manager", &config.package_manager.to_string());
  print_stat("Quality scripts", &config.quality_scripts.join(", "));
  print_stat("Commands dir", &config.commands_dir.display().to_string());
  print_stat("Subtree", &format!("{} ({})", config.subtree.remote, config.subtree.branch));

  let Some(host_root) = ctx.host_root() else {
    return Ok(ExitCode::SUCCESS);
  };

  let link = host_root.join(&config.commands_dir);
  let target = ctx.self_root().join(&config.commands_dir);
  let state = match inspect(&link, &target) {
    Ok(SymlinkState::Absent) => "not linked".to_string(),
    Ok(SymlinkState::CorrectSymlink) => "linked".to_string(),
    Ok(SymlinkState::StaleSymlink(to)) => format!("stale link to {}", to.display()),
    Ok(SymlinkState::RealEntry(kind)) => format!("occupied by a {}", kind),
    Err(e) => format!("unknown ({})", e),
  };
  print_stat("Commands link", &state);

  if !symlink_supported(host_root) {
    println!();
    print_warning("Directory symlinks cannot be created here; `prism sync` will fail to link commands");
  }

  Ok(ExitCode::SUCCESS)
}
