mod commands;
mod core;
mod logging;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::config::RunConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult, print_error};
use std::path::{Path, PathBuf};

/// Fast-forward the release branch, build, commit and push - guarded at every step
#[derive(Parser)]
#[command(name = "release-rail")]
#[command(version, about, long_about = None)]
#[command(styles = ui::style::cli_styles())]
struct Cli {
  /// Log diagnostic details (dry-run flag, branch, repository)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print every command instead of running it
  #[arg(short, long, global = true)]
  dry_run: bool,

  /// Path to a release.toml (default: search the repository root)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
  /// Run the release (default when no command is given)
  Run,

  /// Show the release steps without touching the repository
  Plan,

  /// Write a default release.toml at the repository root
  Init,
}

fn main() {
  let cli = Cli::parse();

  let run = RunConfig {
    dry_run: cli.dry_run,
    verbose: cli.verbose,
  };
  logging::init(run.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(ReleaseError::message(format!("Failed to get current directory: {}", e))),
  };

  let command = cli.command.unwrap_or(Commands::Run);
  if let Err(err) = dispatch(command, &cwd, cli.config.as_deref(), &run) {
    handle_error(err);
  }
}

fn dispatch(command: Commands, cwd: &Path, config: Option<&Path>, run: &RunConfig) -> ReleaseResult<()> {
  match command {
    // runs before any config exists, so no context
    Commands::Init => commands::run_init(cwd),
    Commands::Plan => commands::run_plan(&ReleaseContext::build(cwd, config)?),
    Commands::Run => commands::run_release(&ReleaseContext::build(cwd, config)?, run),
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
