//! Package build collaborator

use crate::core::vcs::Outcome;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Produces the distributable artifact; opaque single call
pub trait BuildTool {
  fn build(&self) -> Outcome;

  /// Command line shown in progress output and dry-run previews
  fn describe(&self) -> String;
}

/// Runs the configured argv in the repository root
///
/// stdout/stderr are inherited so build output streams to the terminal.
pub struct CommandBuild {
  argv: Vec<String>,
  cwd: PathBuf,
}

impl CommandBuild {
  pub fn new(argv: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
    Self { argv, cwd: cwd.into() }
  }
}

impl BuildTool for CommandBuild {
  fn build(&self) -> Outcome {
    let Some((program, args)) = self.argv.split_first() else {
      return Outcome::Failure("no build command configured".to_string());
    };

    debug!(command = %self.describe(), cwd = %self.cwd.display(), "running build");

    match Command::new(program).args(args).current_dir(&self.cwd).status() {
      Ok(status) if status.success() => Outcome::Success,
      Ok(status) => Outcome::Failure(match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
      }),
      Err(e) => Outcome::Failure(format!("failed to run {}: {}", program, e)),
    }
  }

  fn describe(&self) -> String {
    self.argv.join(" ")
  }
}
