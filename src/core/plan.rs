//! The release plan: a fixed, ordered sequence of guarded stages
//!
//! A plan is a pure description. Nothing touches the repository until the
//! runner walks it, and the runner never mutates it.
//!
//! ```text
//! fetch -> require clean -> checkout release -> merge --ff-only dev
//!       -> build -> add output -> commit if dirty -> verify clean
//!       -> push -> checkout dev
//! ```

use crate::core::config::ReleaseConfig;
use std::fmt;
use std::path::PathBuf;

/// One call into a collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  Fetch { remote: String },
  Checkout { branch: String },
  MergeFastForward { branch: String },
  /// Rendered build command line
  Build { command: String },
  Add { path: PathBuf },
  Commit { message: String },
  Push { remote: String, branch: String },
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Operation::Fetch { remote } => write!(f, "git fetch {}", remote),
      Operation::Checkout { branch } => write!(f, "git checkout {}", branch),
      Operation::MergeFastForward { branch } => write!(f, "git merge --ff-only {}", branch),
      Operation::Build { command } => write!(f, "{}", command),
      Operation::Add { path } => write!(f, "git add -- {}", path.display()),
      Operation::Commit { message } => write!(f, "git commit -m {:?}", message),
      Operation::Push { remote, branch } => write!(f, "git push {} {}", remote, branch),
    }
  }
}

/// A labelled operation plus the headline shown if it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  pub label: String,
  pub operation: Operation,
  pub abort_message: String,
}

impl Step {
  pub fn new(label: impl Into<String>, operation: Operation, abort_message: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      operation,
      abort_message: abort_message.into(),
    }
  }
}

/// One position in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  /// Run a step, abort on failure
  Run(Step),
  /// Working tree must be clean before anything is checked out
  RequireClean,
  /// If the tree is dirty, ask for a commit message and commit once
  CommitIfDirty,
  /// Working tree must be clean before pushing
  VerifyClean,
  /// Return to the development branch; the release is already pushed
  Restore(Step),
}

impl Stage {
  /// The step this stage runs, if it runs one unconditionally
  pub fn step(&self) -> Option<&Step> {
    match self {
      Stage::Run(step) | Stage::Restore(step) => Some(step),
      Stage::RequireClean | Stage::CommitIfDirty | Stage::VerifyClean => None,
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Run(step) | Stage::Restore(step) => write!(f, "{} ({})", step.label, step.operation),
      Stage::RequireClean => write!(f, "Require a clean working tree"),
      Stage::CommitIfDirty => write!(f, "Commit build output if anything changed (prompts for a message)"),
      Stage::VerifyClean => write!(f, "Verify the working tree is clean"),
    }
  }
}

/// Ordered stages for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
  release_branch: String,
  development_branch: String,
  stages: Vec<Stage>,
}

impl Plan {
  /// The release sequence for a configuration
  pub fn release(config: &ReleaseConfig) -> Self {
    let release = config.branches.release.clone();
    let development = config.branches.development.clone();
    let remote = config.remote.name.clone();

    let stages = vec![
      Stage::Run(Step::new(
        "Fetching remote updates",
        Operation::Fetch { remote: remote.clone() },
        format!("Failed to fetch from '{}'", remote),
      )),
      Stage::RequireClean,
      Stage::Run(Step::new(
        format!("Switching to {}", release),
        Operation::Checkout {
          branch: release.clone(),
        },
        format!("Failed to check out '{}'", release),
      )),
      Stage::Run(Step::new(
        format!("Merging {} into {}", development, release),
        Operation::MergeFastForward {
          branch: development.clone(),
        },
        format!("Failed to fast-forward '{}' to '{}'", release, development),
      )),
      Stage::Run(Step::new(
        "Building package",
        Operation::Build {
          command: config.build.command.join(" "),
        },
        "Build failed",
      )),
      Stage::Run(Step::new(
        format!("Staging {}", config.build.output.display()),
        Operation::Add {
          path: config.build.output.clone(),
        },
        format!("Failed to stage '{}'", config.build.output.display()),
      )),
      Stage::CommitIfDirty,
      Stage::VerifyClean,
      Stage::Run(Step::new(
        format!("Pushing {} to {}", release, remote),
        Operation::Push {
          remote: remote.clone(),
          branch: release.clone(),
        },
        format!("Failed to push '{}' to '{}'", release, remote),
      )),
      Stage::Restore(Step::new(
        format!("Switching back to {}", development),
        Operation::Checkout {
          branch: development.clone(),
        },
        format!("Failed to check out '{}'", development),
      )),
    ];

    Self {
      release_branch: release,
      development_branch: development,
      stages,
    }
  }

  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  pub fn release_branch(&self) -> &str {
    &self.release_branch
  }

  pub fn development_branch(&self) -> &str {
    &self.development_branch
  }

  /// Commands the plan runs unconditionally, in order
  pub fn commands(&self) -> Vec<String> {
    self
      .stages
      .iter()
      .filter_map(Stage::step)
      .map(|step| step.operation.to_string())
      .collect()
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Numbered listing for `release-rail plan`
  pub fn to_human_readable(&self) -> String {
    let mut out = format!(
      "Release plan: {} -> {} ({} stages)\n",
      self.development_branch,
      self.release_branch,
      self.len()
    );
    for (i, stage) in self.stages.iter().enumerate() {
      out.push_str(&format!("  {:>2}. {}\n", i + 1, stage));
    }
    out
  }
}
