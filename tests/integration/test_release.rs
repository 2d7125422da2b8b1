//! Integration tests for the release run

use crate::helpers::{TestRepo, git, run_release_rail, run_release_rail_ok};
use anyhow::Result;

#[test]
fn test_release_commits_build_output_and_pushes() -> Result<()> {
  let repo = TestRepo::new()?;
  let dev_head = repo.rev("dev")?;

  let output = run_release_rail_ok(&repo.path, &[], "Release 0.1.0\n")?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Released dev to origin/master"), "stdout: {}", stdout);
  assert!(stdout.contains("==> Fetching remote updates"), "stdout: {}", stdout);
  assert_eq!(repo.current_branch()?, "dev");
  assert!(repo.is_clean()?);

  // build output committed on top of the fast-forwarded release branch
  assert_eq!(repo.subject("master")?, "Release 0.1.0");
  assert_eq!(repo.rev("master~1")?, dev_head);
  git(&repo.path, &["cat-file", "-e", "master:dist/package.txt"])?;

  assert_eq!(repo.remote_rev("master")?, repo.rev("master")?);
  Ok(())
}

#[test]
fn test_release_without_changes_skips_commit() -> Result<()> {
  let repo = TestRepo::with_committed_artifact()?;
  let dev_head = repo.rev("dev")?;

  // no stdin: the prompt must not be needed
  run_release_rail_ok(&repo.path, &[], "")?;

  assert_eq!(repo.current_branch()?, "dev");
  assert_eq!(repo.rev("master")?, dev_head);
  assert_eq!(repo.remote_rev("master")?, dev_head);
  Ok(())
}

#[test]
fn test_dirty_tree_aborts_before_checkout() -> Result<()> {
  let repo = TestRepo::new()?;
  let master_before = repo.rev("master")?;
  std::fs::write(repo.path.join("scratch.txt"), "wip\n")?;

  let output = run_release_rail(&repo.path, &[], "")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3), "stderr: {}", stderr);
  assert!(stderr.contains("'dev'"), "stderr: {}", stderr);
  assert_eq!(repo.current_branch()?, "dev");
  assert_eq!(repo.rev("master")?, master_before);
  assert!(repo.file_exists("scratch.txt"));
  assert!(!repo.file_exists("dist"));
  Ok(())
}

#[test]
fn test_cancelled_prompt_aborts_without_commit_or_push() -> Result<()> {
  let repo = TestRepo::new()?;
  let dev_head = repo.rev("dev")?;
  let remote_master = repo.remote_rev("master")?;

  let output = run_release_rail(&repo.path, &[], "\n")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
  assert!(stderr.contains("cancelled"), "stderr: {}", stderr);

  // merged but not committed, nothing pushed, no switch back
  assert_eq!(repo.current_branch()?, "master");
  assert_eq!(repo.rev("master")?, dev_head);
  assert_eq!(repo.remote_rev("master")?, remote_master);
  Ok(())
}

#[test]
fn test_merge_failure_leaves_release_branch_checked_out() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["checkout", "master"])?;
  repo.commit_file("hotfix.txt", "fix\n", "Hotfix on master")?;
  git(&repo.path, &["checkout", "dev"])?;
  let master_before = repo.rev("master")?;
  let remote_master = repo.remote_rev("master")?;

  let output = run_release_rail(&repo.path, &[], "Release\n")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
  assert!(stderr.contains("git merge --ff-only dev"), "stderr: {}", stderr);
  assert_eq!(repo.current_branch()?, "master");
  assert_eq!(repo.rev("master")?, master_before);
  assert_eq!(repo.remote_rev("master")?, remote_master);
  assert!(!repo.file_exists("dist"), "build must not run after a failed merge");
  Ok(())
}

#[test]
fn test_build_failure_aborts_before_staging() -> Result<()> {
  let repo = TestRepo::new()?;
  let config = std::fs::read_to_string(repo.path.join("release.toml"))?;
  let config = config.replace(crate::helpers::BUILD_SCRIPT, "exit 7");
  std::fs::write(repo.path.join("release.toml"), config)?;
  git(&repo.path, &["commit", "-am", "Break build"])?;
  let remote_master = repo.remote_rev("master")?;

  let output = run_release_rail(&repo.path, &[], "Release\n")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
  assert!(stderr.contains("Build failed"), "stderr: {}", stderr);
  assert_eq!(repo.current_branch()?, "master");
  assert_eq!(repo.remote_rev("master")?, remote_master);
  Ok(())
}

#[test]
fn test_dry_run_previews_every_command_without_changes() -> Result<()> {
  let repo = TestRepo::new()?;
  let dev_head = repo.rev("dev")?;
  let master_before = repo.rev("master")?;
  // dirty state is ignored in dry-run
  std::fs::write(repo.path.join("scratch.txt"), "wip\n")?;

  let output = run_release_rail_ok(&repo.path, &["--dry-run"], "")?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let previews: Vec<&str> = stdout.lines().filter(|l| l.contains("[dry-run]")).collect();
  assert_eq!(previews.len(), 7, "stdout: {}", stdout);
  assert!(previews[0].ends_with("git fetch origin"));
  assert!(previews[2].ends_with("git merge --ff-only dev"));
  assert!(previews[6].ends_with("git checkout dev"));
  assert!(stdout.contains("Dry-run mode enabled."));

  // one line per would-be command, framed only by the banner and summary
  let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
  assert_eq!(lines.len(), 9, "stdout: {}", stdout);
  assert_eq!(lines[0], "Dry-run mode enabled.");
  assert!(lines[8].starts_with("Dry run complete: 7 command(s)"), "stdout: {}", stdout);
  assert!(!stdout.contains("==>"), "stdout: {}", stdout);

  assert_eq!(repo.current_branch()?, "dev");
  assert_eq!(repo.rev("dev")?, dev_head);
  assert_eq!(repo.rev("master")?, master_before);
  assert!(!repo.file_exists("dist"));
  Ok(())
}

#[test]
fn test_verbose_logs_branch_to_stderr() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_rail_ok(&repo.path, &["-v", "-d"], "")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(stderr.contains("dry_run=true"), "stderr: {}", stderr);
  assert!(stderr.contains("branch=dev"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_verbose_logs_state_where_release_stopped() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["checkout", "master"])?;
  repo.commit_file("hotfix.txt", "fix\n", "Hotfix on master")?;
  git(&repo.path, &["checkout", "dev"])?;

  let output = run_release_rail(&repo.path, &["--verbose"], "")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
  assert!(stderr.contains("release stopped"), "stderr: {}", stderr);
  assert!(stderr.contains("state=checked-out"), "stderr: {}", stderr);
  Ok(())
}
