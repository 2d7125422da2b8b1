//! System git backend
//!
//! Every operation is one `git` subprocess run against the repository root.
//! Nothing about the repository is cached: branch and working-tree state are
//! re-read on every call because release steps change them.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::with_help(
          format!("Not a git repository: {}", path.display()),
          "Run release-rail from inside the repository you want to release.",
        ));
      }
      return Err(ReleaseError::message(format!(
        "Failed to open git repository: {}",
        stderr.trim()
      )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  /// Repository root all commands run in
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get current branch name, "HEAD" when detached
  pub fn head_branch(&self) -> ReleaseResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Porcelain status lines; empty means clean
  pub fn status_porcelain(&self) -> ReleaseResult<Vec<String>> {
    let output = self
      .git_cmd()
      .args(["status", "--porcelain", "--untracked-files=normal"])
      .output()
      .context("Failed to query working tree status")?;

    if !output.status.success() {
      return Err(ReleaseError::message(format!(
        "git status failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
      )));
    }

    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect(),
    )
  }

  /// Run `git <args>` and capture its output
  pub(crate) fn run(&self, args: &[&str]) -> std::io::Result<Output> {
    self.git_cmd().args(args).output()
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the repository root
  /// - Clears environment variables
  /// - Forwards only the allow-listed variables (see [`forwarded_env`])
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    // Isolated environment (don't trust ambient GIT_* variables)
    cmd.env_clear();
    cmd.envs(forwarded_env(std::env::vars_os()));
    // Never block on an interactive editor or credential prompt
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_EDITOR", "true");

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

/// Variables git needs to reach a remote: paths, ssh-agent and ssh
/// overrides, credential helpers, proxies and TLS roots
const FORWARDED_VARS: &[&str] = &[
  "PATH",
  "HOME",
  "USER",
  "XDG_CONFIG_HOME",
  "SSH_AUTH_SOCK",
  "SSH_AGENT_PID",
  "GIT_SSH",
  "GIT_SSH_COMMAND",
  "GIT_SSH_VARIANT",
  "GIT_ASKPASS",
  "SSH_ASKPASS",
  "HTTP_PROXY",
  "HTTPS_PROXY",
  "ALL_PROXY",
  "NO_PROXY",
  "http_proxy",
  "https_proxy",
  "all_proxy",
  "no_proxy",
  "SSL_CERT_FILE",
  "SSL_CERT_DIR",
  "GIT_SSL_CAINFO",
  "LANG",
  "LANGUAGE",
  "TZ",
];

/// Subset of `vars` a git subprocess may see; `LC_*` locale variables pass too
fn forwarded_env<I>(vars: I) -> Vec<(OsString, OsString)>
where
  I: IntoIterator<Item = (OsString, OsString)>,
{
  vars
    .into_iter()
    .filter(|(key, _)| {
      key
        .to_str()
        .is_some_and(|k| FORWARDED_VARS.contains(&k) || k.starts_with("LC_"))
    })
    .collect()
}
