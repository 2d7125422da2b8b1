//! Commit-message prompt used by the one-shot recovery path

use crate::core::error::ReleaseResult;
use crate::ui;
use std::io::{self, BufRead};

/// What the user answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
  Message(String),
  Cancelled,
}

impl PromptAnswer {
  /// Trimmed input; blank means cancelled
  pub fn from_input(input: &str) -> Self {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      PromptAnswer::Cancelled
    } else {
      PromptAnswer::Message(trimmed.to_string())
    }
  }
}

pub trait Prompter {
  fn commit_message(&mut self, branch: &str) -> ReleaseResult<PromptAnswer>;
}

/// Reads one line from a buffered reader (stdin in production)
pub struct TerminalPrompt<R> {
  input: R,
}

impl TerminalPrompt<io::StdinLock<'static>> {
  pub fn stdin() -> Self {
    Self::new(io::stdin().lock())
  }
}

impl<R: BufRead> TerminalPrompt<R> {
  pub fn new(input: R) -> Self {
    Self { input }
  }
}

impl<R: BufRead> Prompter for TerminalPrompt<R> {
  fn commit_message(&mut self, branch: &str) -> ReleaseResult<PromptAnswer> {
    ui::question(&format!("Uncommitted build output on '{}'. Commit message (blank to cancel):", branch));

    let mut line = String::new();
    match self.input.read_line(&mut line) {
      // EOF
      Ok(0) => Ok(PromptAnswer::Cancelled),
      Ok(_) => Ok(PromptAnswer::from_input(&line)),
      Err(e) => {
        tracing::debug!(error = %e, "reading commit message failed");
        Ok(PromptAnswer::Cancelled)
      }
    }
  }
}
