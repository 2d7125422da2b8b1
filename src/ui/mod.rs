//! Terminal output for release runs
//!
//! Progress lines go to stdout in yellow, command echoes to stdout dimmed,
//! errors and help lines to stderr. Colors are dropped when the stream is not a
//! terminal or `NO_COLOR` is set, so piped output stays plain.

pub mod style;

use style::{Paint, Stream};

/// Progress message for a step that is about to run
pub fn progress(msg: &str) {
  println!("{}", Paint::new(Stream::Stdout).progress(&format!("==> {}", msg)));
}

/// Echo of an external command
pub fn command(cmd: &str) {
  println!("{}", Paint::new(Stream::Stdout).dim(&format!("    $ {}", cmd)));
}

/// Echo of a command that dry-run mode skipped
pub fn preview(cmd: &str) {
  println!("{}", Paint::new(Stream::Stdout).dim(&format!("    [dry-run] {}", cmd)));
}

/// A mode the run was started in (dry-run, verbose)
pub fn mode(name: &str) {
  println!("{}", Paint::new(Stream::Stdout).dim(&format!("{} mode enabled.", name)));
}

/// Final success line
pub fn success(msg: &str) {
  println!("{}", Paint::new(Stream::Stdout).success(msg));
}

/// Fatal error headline
pub fn error(msg: &str) {
  eprintln!("{} {}", Paint::new(Stream::Stderr).error("Error"), msg);
}

/// Suggested fix following an error
pub fn help(msg: &str) {
  eprintln!("{} {}", Paint::new(Stream::Stderr).dim("help:"), msg);
}

/// Question shown before reading a line of input
pub fn question(msg: &str) {
  eprint!("{} ", Paint::new(Stream::Stderr).progress(msg));
}
