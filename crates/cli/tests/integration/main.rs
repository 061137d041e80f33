mod common;

mod context_tests;
mod sync_tests;
mod workspace_tests;
