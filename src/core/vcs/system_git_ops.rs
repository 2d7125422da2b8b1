//! Release operations for SystemGit (fetch, checkout, merge, commit, push)

use super::system_git::SystemGit;
use super::{Outcome, VersionControl};
use crate::core::error::ReleaseResult;
use crate::utils;
use std::path::Path;
use tracing::debug;

impl SystemGit {
  /// Run a mutating git command and fold the result into an Outcome
  fn outcome(&self, args: &[&str]) -> Outcome {
    debug!(command = %format!("git {}", args.join(" ")), "running git");

    match self.run(args) {
      Ok(output) if output.status.success() => Outcome::Success,
      Ok(output) => {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // Some failures (nothing to commit, ff refusals) only print to stdout
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        Outcome::Failure(detail.trim().to_string())
      }
      Err(e) => Outcome::Failure(format!("failed to run git: {}", e)),
    }
  }

  /// Get remote URL, None when the remote is not configured
  pub fn remote_url(&self, name: &str) -> ReleaseResult<Option<String>> {
    let output = self.git_cmd().args(["remote", "get-url", name]).output()?;

    if !output.status.success() {
      return Ok(None);
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if url.is_empty() { None } else { Some(url) })
  }

  /// `owner/repo` for the given remote, when it points at a hosted repository
  pub fn repo_slug(&self, remote: &str) -> ReleaseResult<Option<String>> {
    Ok(self.remote_url(remote)?.and_then(|url| utils::parse_repo_slug(&url)))
  }
}

impl VersionControl for SystemGit {
  fn current_branch(&self) -> ReleaseResult<String> {
    self.head_branch()
  }

  fn is_dirty(&self) -> ReleaseResult<bool> {
    Ok(!self.status_porcelain()?.is_empty())
  }

  fn fetch(&self, remote: &str) -> Outcome {
    self.outcome(&["fetch", remote])
  }

  fn checkout(&self, branch: &str) -> Outcome {
    self.outcome(&["checkout", branch])
  }

  fn merge_fast_forward(&self, branch: &str) -> Outcome {
    self.outcome(&["merge", "--ff-only", branch])
  }

  fn add(&self, path: &Path) -> Outcome {
    let path = utils::path_to_git_format(path);
    self.outcome(&["add", "--", &path])
  }

  fn commit(&self, message: &str) -> Outcome {
    self.outcome(&["commit", "-m", message])
  }

  fn push(&self, remote: &str, branch: &str) -> Outcome {
    self.outcome(&["push", remote, branch])
  }
}
