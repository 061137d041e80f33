//! Sync command integration tests.
//!
//! The host in these tests is not a git repository, so the subtree pull always
//! fails. That is enough to check that nothing after it runs.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn failed_pull_stops_sync_before_linking() {
  let env = TestEnv::embedded();
  env.mkdir("prism/.claude/commands");

  env.prism_cmd().arg("sync").assert().failure();

  assert!(!env.host().join(".claude").exists());
}

#[test]
fn failed_pull_stops_command_sync_before_linking() {
  let env = TestEnv::embedded();
  env.mkdir("prism/.claude/commands");

  env.prism_cmd().arg("sync-commands").assert().failure();

  assert!(!env.host().join(".claude").exists());
}

#[test]
fn sync_prints_the_subtree_pull() {
  let env = TestEnv::embedded();

  env
    .prism_cmd()
    .arg("sync-commands")
    .assert()
    .failure()
    .stdout(predicate::str::contains("git subtree pull --prefix=prism prism main --squash"));
}

#[test]
fn sync_uses_configured_remote_and_branch() {
  let env = TestEnv::embedded();
  env.write_file("prism/prism.json", r#"{ "subtree": { "remote": "upstream", "branch": "stable" } }"#);

  env
    .prism_cmd()
    .arg("sync-commands")
    .assert()
    .failure()
    .stdout(predicate::str::contains("--prefix=prism upstream stable --squash"));
}
