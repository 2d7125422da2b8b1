//! Guarded command runner
//!
//! Walks a [`Plan`] stage by stage. Every external call must succeed before
//! the next one starts; the first failure ends the run with an error and
//! nothing already done is rolled back. In dry-run mode each command is
//! echoed instead of executed and cleanliness checks report `Clean` without
//! asking git.
//!
//! The only recovery is the one-shot commit prompt after the build output is
//! staged. It is not retried: if the tree is still dirty after committing,
//! the run aborts.

use crate::core::build::BuildTool;
use crate::core::config::RunConfig;
use crate::core::error::{Checkpoint, CommandError, PreconditionError, ReleaseError, ReleaseResult};
use crate::core::plan::{Operation, Plan, Stage, Step};
use crate::core::prompt::{PromptAnswer, Prompter};
use crate::core::vcs::{Outcome, VersionControl, WorkingTreeState};
use crate::ui;
use std::fmt;
use tracing::debug;

/// Where a release run has got to
///
/// Linear; any state can end the run by aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
  Start,
  Fetched,
  PreconditionChecked,
  CheckedOut,
  Merged,
  Built,
  Staged,
  /// Nothing to commit after staging
  CommitChecked,
  /// Recovery commit made
  Committed,
  Pushed,
  Restored,
  Done,
}

impl fmt::Display for ReleaseState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ReleaseState::Start => "start",
      ReleaseState::Fetched => "fetched",
      ReleaseState::PreconditionChecked => "precondition-checked",
      ReleaseState::CheckedOut => "checked-out",
      ReleaseState::Merged => "merged",
      ReleaseState::Built => "built",
      ReleaseState::Staged => "staged",
      ReleaseState::CommitChecked => "commit-checked",
      ReleaseState::Committed => "committed",
      ReleaseState::Pushed => "pushed",
      ReleaseState::Restored => "restored",
      ReleaseState::Done => "done",
    };
    write!(f, "{}", name)
  }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub state: ReleaseState,
  /// Commands actually run
  pub executed: Vec<String>,
  /// Commands echoed in dry-run mode
  pub previewed: Vec<String>,
  pub committed: bool,
}

/// Executes release plans against the collaborators
pub struct Runner<'a, V, B, P> {
  config: &'a RunConfig,
  vcs: &'a V,
  build: &'a B,
  prompt: P,
  state: ReleaseState,
  executed: Vec<String>,
  previewed: Vec<String>,
  committed: bool,
}

impl<'a, V, B, P> Runner<'a, V, B, P>
where
  V: VersionControl,
  B: BuildTool,
  P: Prompter,
{
  pub fn new(config: &'a RunConfig, vcs: &'a V, build: &'a B, prompt: P) -> Self {
    Self {
      config,
      vcs,
      build,
      prompt,
      state: ReleaseState::Start,
      executed: Vec::new(),
      previewed: Vec::new(),
      committed: false,
    }
  }

  /// Last state reached, also meaningful after an abort
  pub fn state(&self) -> ReleaseState {
    self.state
  }

  fn advance(&mut self, next: ReleaseState) {
    debug!(from = %self.state, to = %next, "release state");
    self.state = next;
  }

  /// Progress headline for a step; dry-run prints only the preview line
  fn announce(&self, label: &str) {
    if !self.config.dry_run {
      ui::progress(label);
    }
  }

  /// Query the working tree; always asks git, never remembers the answer
  pub fn check_clean(&self) -> ReleaseResult<WorkingTreeState> {
    if self.config.dry_run {
      return Ok(WorkingTreeState::Clean);
    }

    Ok(if self.vcs.is_dirty()? {
      WorkingTreeState::Dirty
    } else {
      WorkingTreeState::Clean
    })
  }

  /// Run one step, or echo it in dry-run mode
  pub fn run_step(&mut self, step: &Step) -> ReleaseResult<()> {
    let command = step.operation.to_string();

    if self.config.dry_run {
      ui::preview(&command);
      self.previewed.push(command);
      return Ok(());
    }

    ui::command(&command);
    let outcome = match &step.operation {
      Operation::Fetch { remote } => self.vcs.fetch(remote),
      Operation::Checkout { branch } => self.vcs.checkout(branch),
      Operation::MergeFastForward { branch } => self.vcs.merge_fast_forward(branch),
      Operation::Build { .. } => self.build.build(),
      Operation::Add { path } => self.vcs.add(path),
      Operation::Commit { message } => self.vcs.commit(message),
      Operation::Push { remote, branch } => self.vcs.push(remote, branch),
    };
    self.executed.push(command.clone());

    match outcome {
      Outcome::Success => Ok(()),
      Outcome::Failure(detail) => Err(ReleaseError::Command(CommandError {
        abort_message: step.abort_message.clone(),
        command,
        detail,
      })),
    }
  }

  /// Run the whole plan, stopping at the first failure
  pub fn execute_plan(&mut self, plan: &Plan) -> ReleaseResult<RunReport> {
    let start_branch = self.vcs.current_branch()?;
    debug!(
      dry_run = self.config.dry_run,
      verbose = self.config.verbose,
      branch = %start_branch,
      "starting release"
    );

    for stage in plan.stages() {
      match stage {
        Stage::Run(step) => {
          self.announce(&step.label);
          self.run_step(step)?;
          if let Some(next) = state_after(&step.operation) {
            self.advance(next);
          }
        }
        Stage::RequireClean => {
          if self.check_clean()? == WorkingTreeState::Dirty {
            return Err(ReleaseError::Precondition(PreconditionError {
              checkpoint: Checkpoint::BeforeCheckout,
              branch: start_branch,
            }));
          }
          self.advance(ReleaseState::PreconditionChecked);
        }
        Stage::CommitIfDirty => self.commit_if_dirty(plan.release_branch())?,
        Stage::VerifyClean => {
          if self.check_clean()? == WorkingTreeState::Dirty {
            let checkpoint = if self.committed {
              Checkpoint::AfterCommit
            } else {
              Checkpoint::BeforePush
            };
            return Err(ReleaseError::Precondition(PreconditionError {
              checkpoint,
              branch: plan.release_branch().to_string(),
            }));
          }
        }
        Stage::Restore(step) => {
          self.announce(&step.label);
          self.run_step(step).map_err(|err| match err {
            ReleaseError::Command(e) => ReleaseError::Restore {
              branch: plan.development_branch().to_string(),
              detail: e.detail,
            },
            other => other,
          })?;
          self.advance(ReleaseState::Restored);
        }
      }
    }

    self.advance(ReleaseState::Done);
    Ok(RunReport {
      state: self.state,
      executed: self.executed.clone(),
      previewed: self.previewed.clone(),
      committed: self.committed,
    })
  }

  /// One-shot recovery: commit staged build output with a user-supplied message
  fn commit_if_dirty(&mut self, branch: &str) -> ReleaseResult<()> {
    if self.check_clean()? == WorkingTreeState::Clean {
      self.advance(ReleaseState::CommitChecked);
      return Ok(());
    }

    let message = match self.prompt.commit_message(branch)? {
      PromptAnswer::Message(message) => message,
      PromptAnswer::Cancelled => {
        return Err(ReleaseError::Cancelled {
          reason: format!("no commit message given for changes on '{}'", branch),
        });
      }
    };

    let step = Step::new(
      "Committing build output",
      Operation::Commit { message },
      format!("Failed to commit on '{}'", branch),
    );
    self.announce(&step.label);
    self.run_step(&step)?;
    self.committed = true;
    self.advance(ReleaseState::Committed);
    Ok(())
  }
}

/// State reached after a plain step succeeds
fn state_after(operation: &Operation) -> Option<ReleaseState> {
  match operation {
    Operation::Fetch { .. } => Some(ReleaseState::Fetched),
    Operation::Checkout { .. } => Some(ReleaseState::CheckedOut),
    Operation::MergeFastForward { .. } => Some(ReleaseState::Merged),
    Operation::Build { .. } => Some(ReleaseState::Built),
    Operation::Add { .. } => Some(ReleaseState::Staged),
    Operation::Commit { .. } => Some(ReleaseState::Committed),
    Operation::Push { .. } => Some(ReleaseState::Pushed),
  }
}
