//! End-to-end tests for prism-lib against real processes and filesystems.

#[cfg(unix)]
mod common;

#[cfg(unix)]
mod pipeline_tests;
#[cfg(unix)]
mod scan_tests;
