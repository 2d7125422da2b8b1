//! Integration tests for help, plan and init

use crate::helpers::{TestRepo, git, run_release_rail, run_release_rail_ok};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_help_variants_exit_zero_without_side_effects() -> Result<()> {
  let repo = TestRepo::new()?;
  let dev_head = repo.rev("dev")?;

  for args in [&["--help"][..], &["-h"][..], &["help"][..]] {
    let output = run_release_rail_ok(&repo.path, args, "")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "{:?}: {}", args, stdout);
    assert!(stdout.contains("--dry-run"), "{:?}: {}", args, stdout);
  }

  assert_eq!(repo.current_branch()?, "dev");
  assert_eq!(repo.rev("dev")?, dev_head);
  Ok(())
}

#[test]
fn test_plan_lists_stages() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_rail_ok(&repo.path, &["plan"], "")?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("release.toml"), "stdout: {}", stdout);
  assert!(stdout.contains("git merge --ff-only dev"));
  assert!(stdout.contains("git push origin master"));
  assert_eq!(repo.current_branch()?, "dev");
  Ok(())
}

#[test]
fn test_init_writes_config_once() -> Result<()> {
  let dir = TempDir::new()?;
  git(dir.path(), &["init", "--initial-branch=dev"])?;

  run_release_rail_ok(dir.path(), &["init"], "")?;
  let written = std::fs::read_to_string(dir.path().join("release.toml"))?;
  assert!(written.contains("[branches]"));
  assert!(written.contains("release = \"master\""));

  let output = run_release_rail(dir.path(), &["init"], "")?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_invalid_config_is_a_user_error() -> Result<()> {
  let repo = TestRepo::new()?;
  std::fs::write(
    repo.path.join("custom.toml"),
    "[branches]\nrelease = \"dev\"\ndevelopment = \"dev\"\n",
  )?;

  let output = run_release_rail(&repo.path, &["--config", "custom.toml"], "")?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
  assert!(stderr.contains("branches.development"), "stderr: {}", stderr);
  assert_eq!(repo.current_branch()?, "dev");
  Ok(())
}

#[test]
fn test_outside_repository_fails() -> Result<()> {
  let dir = TempDir::new()?;
  let output = run_release_rail(dir.path(), &["--dry-run"], "")?;
  assert!(!output.status.success());
  Ok(())
}
