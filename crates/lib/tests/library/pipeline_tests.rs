//! Pipelines driven by real shell commands.

use prism_lib::link::{SymlinkState, inspect};
use prism_lib::{Pipeline, ProcessRunner, Stage, Step};
use tempfile::TempDir;

use super::common::{sh, write_file};

#[tokio::test]
async fn failing_host_stage_never_reaches_subtree() {
  let temp = TempDir::new().unwrap();
  let root = temp.path();

  let pipeline = Pipeline::new(vec![
    Stage::new(
      "host project",
      vec![
        Step::command("typecheck", sh("touch typecheck.ran", root)),
        Step::command("lint", sh("exit 3", root)),
        Step::command("test", sh("touch test.ran", root)),
      ],
    ),
    Stage::new("prism project", vec![Step::command("typecheck", sh("touch subtree.ran", root))]),
  ]);

  let report = pipeline.run(&ProcessRunner).await.unwrap();

  assert!(!report.succeeded());
  assert!(root.join("typecheck.ran").exists());
  assert!(!root.join("test.ran").exists());
  assert!(!root.join("subtree.ran").exists());

  let aborted = report.aborted.unwrap();
  assert_eq!((aborted.stage.as_str(), aborted.step.as_str()), ("host project", "lint"));
  assert_eq!(report.stages[0].results[1].exit_code, Some(3));
}

#[tokio::test]
async fn commands_run_in_their_working_directory() {
  let temp = TempDir::new().unwrap();
  let sub = temp.path().join("pkg");
  std::fs::create_dir_all(&sub).unwrap();

  let pipeline = Pipeline::new(vec![Stage::new("project", vec![Step::command("mark", sh("touch here", &sub))])]);
  let report = pipeline.run(&ProcessRunner).await.unwrap();

  assert!(report.succeeded());
  assert!(sub.join("here").exists());
  assert!(!temp.path().join("here").exists());
}

#[tokio::test]
async fn link_step_is_idempotent_across_runs() {
  let temp = TempDir::new().unwrap();
  let host = temp.path();
  write_file(host, "prism/.claude/commands/review.md", "# review");

  let link = host.join(".claude/commands");
  let target = host.join("prism/.claude/commands");
  let pipeline = Pipeline::new(vec![Stage::new(
    "sync",
    vec![Step::link("commands", link.clone(), target.clone())],
  )]);

  let first = pipeline.run(&ProcessRunner).await.unwrap();
  let second = pipeline.run(&ProcessRunner).await.unwrap();

  assert!(first.succeeded() && second.succeeded());
  assert_eq!(inspect(&link, &target).unwrap(), SymlinkState::CorrectSymlink);
  assert!(second.stages[0].results[0].detail.as_deref().unwrap().contains("already linked"));
  assert_eq!(std::fs::read_to_string(link.join("review.md")).unwrap(), "# review");
}

#[tokio::test]
async fn missing_program_is_an_error() {
  let temp = TempDir::new().unwrap();
  let spec = prism_lib::CommandSpec::new("prism-test-no-such-program", vec![], temp.path());
  let pipeline = Pipeline::new(vec![Stage::new("project", vec![Step::command("ghost", spec)])]);

  let err = pipeline.run(&ProcessRunner).await.unwrap_err();
  assert!(err.to_string().contains("prism-test-no-such-program"));
}
