//! Init command: write a default release.toml

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::ui;
use std::path::Path;

/// Write release.toml with the default settings at the repository root
pub fn run_init(cwd: &Path) -> ReleaseResult<()> {
  let git = SystemGit::open(cwd)?;
  let path = ReleaseConfig::default().save_new(git.work_tree())?;

  ui::success(&format!("Created {}", path.display()));
  println!("Edit the branch names, remote and build command to match your project.");

  Ok(())
}
