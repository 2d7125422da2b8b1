//! Plan command: show the release sequence

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::core::plan::Plan;

/// Print the numbered release stages for the loaded configuration
pub fn run_plan(ctx: &ReleaseContext) -> ReleaseResult<()> {
  let plan = Plan::release(&ctx.config);

  match &ctx.config_path {
    Some(path) => println!("Config: {}", path.display()),
    None => println!("Config: built-in defaults"),
  }
  print!("{}", plan.to_human_readable());

  Ok(())
}
