//! Error types for release-rail with contextual messages and exit codes
//!
//! Every abort in a release run surfaces as one of these variants. Nothing in
//! the engine exits the process; `main` is the single place that turns an
//! error into a printed message and a non-zero status.

use crate::ui;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, cancelled prompt, invalid args)
  User = 1,
  /// System error (git, build, I/O)
  System = 2,
  /// Validation failure (dirty working tree at a checkpoint)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-rail
#[derive(Debug)]
pub enum ReleaseError {
  /// Working tree was dirty at a checkpoint
  Precondition(PreconditionError),

  /// An external command (git, build tool) failed
  Command(CommandError),

  /// The commit prompt was declined or left empty
  Cancelled { reason: String },

  /// Returning to the development branch failed after the push succeeded
  Restore { branch: String, detail: String },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Precondition(_) => ExitCode::Validation,
      ReleaseError::Command(_) => ExitCode::System,
      ReleaseError::Cancelled { .. } => ExitCode::User,
      ReleaseError::Restore { .. } => ExitCode::System,
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Precondition(e) => Some(e.help_message()),
      ReleaseError::Command(e) => e.help_message(),
      ReleaseError::Cancelled { .. } => {
        Some("Nothing was committed or pushed. Re-run and enter a commit message to continue.".to_string())
      }
      ReleaseError::Restore { branch, .. } => Some(format!(
        "The release was pushed. Switch back manually with `git checkout {}`.",
        branch
      )),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Precondition(e) => write!(f, "{}", e),
      ReleaseError::Command(e) => write!(f, "{}", e),
      ReleaseError::Cancelled { reason } => write!(f, "Release cancelled: {}", reason),
      ReleaseError::Restore { branch, detail } => {
        write!(f, "Release pushed, but failed to check out '{}': {}", branch, detail)
      }
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ReleaseError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ReleaseError::message(format!("TOML serialization error: {}", err))
  }
}

/// Which cleanliness checkpoint failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
  /// Before anything is checked out or merged
  BeforeCheckout,
  /// After the one-shot recovery commit
  AfterCommit,
  /// Right before pushing
  BeforePush,
}

/// Dirty working tree at a checkpoint
#[derive(Debug)]
pub struct PreconditionError {
  pub checkpoint: Checkpoint,
  pub branch: String,
}

impl PreconditionError {
  fn help_message(&self) -> String {
    match self.checkpoint {
      Checkpoint::BeforeCheckout => format!(
        "Commit, stash or discard the changes on '{}' yourself, then re-run.",
        self.branch
      ),
      Checkpoint::AfterCommit | Checkpoint::BeforePush => format!(
        "Resolve the remaining changes on '{}' and fold them in with `git commit --amend`, then re-run.",
        self.branch
      ),
    }
  }
}

impl fmt::Display for PreconditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.checkpoint {
      Checkpoint::BeforeCheckout => {
        write!(f, "Working tree on branch '{}' has uncommitted changes", self.branch)
      }
      Checkpoint::AfterCommit => write!(
        f,
        "Working tree on branch '{}' still has uncommitted changes after committing",
        self.branch
      ),
      Checkpoint::BeforePush => write!(
        f,
        "Working tree on branch '{}' has uncommitted changes before push",
        self.branch
      ),
    }
  }
}

/// External command failure
#[derive(Debug)]
pub struct CommandError {
  /// What the step was trying to do, shown as the headline
  pub abort_message: String,
  /// Rendered command line
  pub command: String,
  /// Collaborator-provided detail (usually stderr)
  pub detail: String,
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    let detail = self.detail.to_lowercase();
    if detail.contains("not possible to fast-forward") || detail.contains("diverging") {
      Some("The release branch has commits the development branch lacks. Reconcile them by hand.".to_string())
    } else if detail.contains("non-fast-forward") || detail.contains("rejected") {
      Some("The remote has commits you don't have. Fetch and reconcile before releasing again.".to_string())
    } else if detail.contains("permission denied") || detail.contains("403") {
      Some("Check your credentials and access to the remote.".to_string())
    } else {
      None
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n  command: {}", self.abort_message, self.command)?;
    let detail = self.detail.trim();
    if !detail.is_empty() {
      write!(f, "\n  {}", detail)?;
    }
    Ok(())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config path does not exist
  NotFound { path: PathBuf },

  /// Config file exists where `init` would write one
  AlreadyExists { path: PathBuf },

  /// Field present but unusable
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `release-rail init` to create a configuration file.".to_string()),
      ConfigError::AlreadyExists { .. } => Some("Edit the existing file instead.".to_string()),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration file already exists: {}", path.display())
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config field '{}': {}", field, reason)
      }
    }
  }
}

/// Result type alias for release-rail
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with colors and help text
pub fn print_error(error: &ReleaseError) {
  ui::error(&error.to_string());

  if let Some(help) = error.help_message() {
    ui::help(&help);
  }
}
