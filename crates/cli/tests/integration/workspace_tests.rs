//! Workspace listing and scan integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn monorepo() -> TestEnv {
  let env = TestEnv::embedded();
  env.write_file(
    "package.json",
    r#"{ "name": "host", "workspaces": ["apps/*", "tools/cli"] }"#,
  );
  env.write_file("apps/web/tsconfig.json", "{}");
  env.write_file("apps/api/package.json", r#"{ "scripts": { "test": "vitest run" } }"#);
  env.mkdir("apps/docs");
  env
}

#[test]
fn workspaces_lists_host_workspaces_with_their_checks() {
  let env = monorepo();

  env
    .prism_cmd()
    .arg("workspaces")
    .assert()
    .success()
    .stdout(predicate::str::contains("apps/api (test)"))
    .stdout(predicate::str::contains("apps/docs (no checks)"))
    .stdout(predicate::str::contains("apps/web (typecheck)"))
    .stdout(predicate::str::contains("tools/cli (missing)"));
}

#[test]
fn workspaces_without_declarations() {
  let env = TestEnv::embedded();
  env.write_file("package.json", r#"{ "name": "host" }"#);

  env
    .prism_cmd()
    .arg("workspaces")
    .assert()
    .success()
    .stdout(predicate::str::contains("No workspaces declared"));
}

#[test]
fn typecheck_skips_when_nothing_is_eligible() {
  let env = TestEnv::embedded();
  env.write_file("package.json", r#"{ "workspaces": ["apps/*"] }"#);
  env.mkdir("apps/docs");

  env
    .prism_cmd()
    .arg("typecheck")
    .assert()
    .success()
    .stdout(predicate::str::contains("No workspaces eligible for typecheck"));
}

#[test]
fn malformed_host_manifest_fails() {
  let env = TestEnv::embedded();
  env.write_file("package.json", "{ \"workspaces\": ");

  env
    .prism_cmd()
    .arg("workspaces")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse manifest"));
}
