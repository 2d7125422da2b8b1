//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Build command that writes the release artifact
pub const BUILD_SCRIPT: &str = "mkdir -p dist && echo built > dist/package.txt";

/// A working clone on `dev` with a bare `origin` holding `master` and `dev`
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  pub remote: PathBuf,
}

impl TestRepo {
  /// Repository whose build produces a new, uncommitted artifact
  pub fn new() -> Result<Self> {
    Self::create(false)
  }

  /// Repository whose build reproduces an artifact already committed
  pub fn with_committed_artifact() -> Result<Self> {
    Self::create(true)
  }

  fn create(seed_artifact: bool) -> Result<Self> {
    let root = TempDir::new()?;
    let remote = root.path().join("remote.git");
    let path = root.path().join("work");

    git(root.path(), &["init", "--bare", "--initial-branch=master", "remote.git"])?;
    git(root.path(), &["init", "--initial-branch=master", "work"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(path.join("README.md"), "# demo\n")?;
    std::fs::write(
      path.join("release.toml"),
      format!(
        r#"[branches]
release = "master"
development = "dev"

[remote]
name = "origin"

[build]
command = ["sh", "-c", "{}"]
output = "dist"
"#,
        BUILD_SCRIPT
      ),
    )?;
    if seed_artifact {
      std::fs::create_dir_all(path.join("dist"))?;
      std::fs::write(path.join("dist/package.txt"), "built\n")?;
    }

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;
    git(&path, &["remote", "add", "origin", &remote.display().to_string()])?;
    git(&path, &["push", "origin", "master"])?;

    git(&path, &["checkout", "-b", "dev"])?;
    std::fs::write(path.join("feature.txt"), "new feature\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Add feature"])?;
    git(&path, &["push", "origin", "dev"])?;

    Ok(Self {
      _root: root,
      path,
      remote,
    })
  }

  /// Commit a file on the current branch
  pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content)?;
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  pub fn current_branch(&self) -> Result<String> {
    stdout(git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])?)
  }

  /// SHA of a ref in the working clone
  pub fn rev(&self, refname: &str) -> Result<String> {
    stdout(git(&self.path, &["rev-parse", refname])?)
  }

  /// SHA of a branch in the bare remote
  pub fn remote_rev(&self, branch: &str) -> Result<String> {
    stdout(git(&self.remote, &["rev-parse", branch])?)
  }

  /// Subject line of a ref's tip commit
  pub fn subject(&self, refname: &str) -> Result<String> {
    stdout(git(&self.path, &["log", "-1", "--format=%s", refname])?)
  }

  pub fn is_clean(&self) -> Result<bool> {
    Ok(stdout(git(&self.path, &["status", "--porcelain"])?)?.is_empty())
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

fn stdout(output: Output) -> Result<String> {
  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run release-rail, feeding `input` on stdin; does not check the exit status
pub fn run_release_rail(cwd: &Path, args: &[&str], input: &str) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-rail");

  let mut child = Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env("NO_COLOR", "1")
    .env_remove("RUST_LOG")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run release-rail")?;

  if let Some(mut stdin) = child.stdin.take() {
    // The binary may exit before reading (e.g. an early abort)
    let _ = stdin.write_all(input.as_bytes());
  }

  Ok(child.wait_with_output()?)
}

/// Run release-rail and fail unless it exits successfully
pub fn run_release_rail_ok(cwd: &Path, args: &[&str], input: &str) -> Result<Output> {
  let output = run_release_rail(cwd, args, input)?;

  if !output.status.success() {
    anyhow::bail!(
      "release-rail {} failed\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}
