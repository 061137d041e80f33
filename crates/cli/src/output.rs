//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, step headers, human-readable durations, and Unicode symbols.

use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const STAGE: &str = "::";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// Section header printed when a stage or scan starts.
pub fn print_header(title: &str) {
  println!();
  println!(
    "{} {}",
    symbols::STAGE.if_supports_color(Stream::Stdout, |s| s.cyan()),
    title.if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

/// Line printed before a step or workspace command starts.
pub fn print_step(name: &str, action: &str) {
  println!(
    "{} {} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    name,
    format!("({})", action).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

/// Line printed after a step or workspace command finishes.
pub fn print_step_result(name: &str, succeeded: bool, duration: Duration, detail: Option<&str>) {
  let timing = format_duration(duration);
  match (succeeded, detail) {
    (true, Some(detail)) => print_success(&format!("{} {} [{}]", name, detail, timing)),
    (true, None) => print_success(&format!("{} [{}]", name, timing)),
    (false, Some(detail)) => print_error(&format!("{}: {} [{}]", name, detail, timing)),
    (false, None) => print_error(&format!("{} failed [{}]", name, timing)),
  }
}
