//! Release context - built once in main, passed to every command
//!
//! ```text
//! main.rs:
//!   ReleaseContext::build() -> &ReleaseContext
//!   |
//!   v
//! commands/release.rs, plan.rs:
//!   fn run_*(ctx: &ReleaseContext, run: &RunConfig)
//! ```

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Repository handle plus the release configuration that applies to it
pub struct ReleaseContext {
  /// Git handle rooted at the repository's working tree
  pub git: SystemGit,

  /// Loaded configuration (defaults when no file exists)
  pub config: ReleaseConfig,

  /// File the configuration came from, if any
  pub config_path: Option<PathBuf>,
}

impl ReleaseContext {
  /// Open the repository containing `cwd` and load its release config
  pub fn build(cwd: &Path, explicit_config: Option<&Path>) -> ReleaseResult<Self> {
    let git = SystemGit::open(cwd)?;
    let (config, config_path) = ReleaseConfig::load(git.work_tree(), explicit_config)?;

    Ok(Self {
      git,
      config,
      config_path,
    })
  }

  /// Repository root (convenience)
  pub fn root(&self) -> &Path {
    self.git.work_tree()
  }
}
