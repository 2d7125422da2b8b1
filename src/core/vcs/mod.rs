pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::ReleaseResult;
use std::path::Path;

/// Result of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Success,
  /// Non-zero exit or spawn failure, with whatever the tool printed
  Failure(String),
}

impl Outcome {
  #[allow(dead_code)]
  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success)
  }
}

/// Derived on demand from the collaborator, never cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingTreeState {
  Clean,
  Dirty,
}

/// Version-control operations the release runner needs
///
/// Queries return `ReleaseResult` because the runner cannot continue without
/// an answer. Mutations return an `Outcome` that the runner turns into an
/// abort with the step's own message.
pub trait VersionControl {
  fn current_branch(&self) -> ReleaseResult<String>;

  /// True when there are staged, unstaged or untracked changes
  fn is_dirty(&self) -> ReleaseResult<bool>;

  fn fetch(&self, remote: &str) -> Outcome;

  fn checkout(&self, branch: &str) -> Outcome;

  /// Merge refusing anything but a fast-forward
  fn merge_fast_forward(&self, branch: &str) -> Outcome;

  fn add(&self, path: &Path) -> Outcome;

  fn commit(&self, message: &str) -> Outcome;

  fn push(&self, remote: &str, branch: &str) -> Outcome;
}
