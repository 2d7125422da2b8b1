//! Release command implementation

use crate::core::build::{BuildTool, CommandBuild};
use crate::core::config::RunConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::core::plan::Plan;
use crate::core::prompt::TerminalPrompt;
use crate::core::runner::Runner;
use crate::ui;
use tracing::debug;

/// Run the release sequence against the current repository
pub fn run_release(ctx: &ReleaseContext, run: &RunConfig) -> ReleaseResult<()> {
  if run.verbose {
    ui::mode("Verbose");
  }
  if run.dry_run {
    ui::mode("Dry-run");
  }

  let config = &ctx.config;
  let source = match &ctx.config_path {
    Some(path) => path.display().to_string(),
    None => "<defaults>".to_string(),
  };
  debug!(root = %ctx.root().display(), config = %source, "release context");
  if let Some(slug) = ctx.git.repo_slug(&config.remote.name)? {
    debug!(repo = %slug, remote = %config.remote.name, "repository");
  }

  let plan = Plan::release(config);
  let build = CommandBuild::new(config.build.command.clone(), ctx.root());
  debug!(build = %build.describe(), stages = plan.len(), commands = ?plan.commands(), "plan ready");

  let mut runner = Runner::new(run, &ctx.git, &build, TerminalPrompt::stdin());
  let report = match runner.execute_plan(&plan) {
    Ok(report) => report,
    Err(err) => {
      debug!(state = %runner.state(), "release stopped");
      return Err(err);
    }
  };
  debug!(state = %report.state, committed = report.committed, "release finished");

  println!();
  if run.dry_run {
    ui::success(&format!(
      "Dry run complete: {} command(s) previewed, nothing changed",
      report.previewed.len()
    ));
  } else {
    ui::success(&format!(
      "Released {} to {}/{} ({} command(s) run{})",
      plan.development_branch(),
      config.remote.name,
      plan.release_branch(),
      report.executed.len(),
      if report.committed { ", build output committed" } else { "" }
    ));
  }

  Ok(())
}
