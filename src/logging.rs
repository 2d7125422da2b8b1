//! Diagnostic tracing for `--verbose`
//!
//! Status lines the user is meant to read go through `ui`. This module only
//! wires up `tracing` output: stderr, compact format, `RUST_LOG` wins over the
//! flag-derived default.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the given verbosity
pub fn default_filter(verbose: bool) -> &'static str {
  if verbose { "release_rail=debug" } else { "warn" }
}

/// Initialize the tracing subscriber; call once from main
pub fn init(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact(),
    )
    .init();
}
