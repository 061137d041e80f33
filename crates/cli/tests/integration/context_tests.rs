//! Mount context integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::TestEnv;

#[test]
fn info_reports_embedded_host() {
  let env = TestEnv::embedded();

  env
    .prism_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("embedded"))
    .stdout(predicate::str::contains(env.host().display().to_string()));
}

#[test]
fn context_does_not_depend_on_working_directory() {
  let env = TestEnv::embedded();
  let elsewhere = TempDir::new().unwrap();

  env
    .prism_cmd_in(elsewhere.path())
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("embedded"));
}

#[test]
fn nested_subtree_names_are_ambiguous() {
  let temp = TempDir::new().unwrap();
  let bin_dir = temp.path().join("prism").join("prism").join("bin");
  std::fs::create_dir_all(&bin_dir).unwrap();
  let bin = bin_dir.join(format!("prism{}", std::env::consts::EXE_SUFFIX));
  std::fs::copy(env!("CARGO_BIN_EXE_prism"), &bin).unwrap();

  Command::new(&bin)
    .arg("info")
    .current_dir(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("ambiguous mount context"));
}

#[test]
fn embedded_quality_without_manifests_is_a_skip() {
  let env = TestEnv::embedded();

  env
    .prism_cmd()
    .arg("quality")
    .assert()
    .success()
    .stdout(predicate::str::contains("skipping prism project checks"));
}

#[test]
fn config_is_read_from_the_subtree() {
  let env = TestEnv::embedded();
  env.write_file("prism/prism.json", r#"{ "packageManager": "pnpm", "commandsDir": "tooling/commands" }"#);

  env
    .prism_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("pnpm"))
    .stdout(predicate::str::contains("tooling/commands"));
}

#[cfg(unix)]
#[test]
fn info_shows_commands_link_state() {
  let env = TestEnv::embedded();
  let target = env.mkdir("prism/.claude/commands");
  env.mkdir(".claude");
  std::os::unix::fs::symlink(&target, env.host().join(".claude/commands")).unwrap();

  env
    .prism_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("Commands link: linked"));
}
