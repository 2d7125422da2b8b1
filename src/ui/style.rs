//! anstyle palette shared by the CLI help and runtime output

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

/// Output stream a painted string is destined for
#[derive(Debug, Clone, Copy)]
pub enum Stream {
  Stdout,
  Stderr,
}

impl Stream {
  fn supports_color(self) -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
      return false;
    }
    match self {
      Stream::Stdout => std::io::stdout().is_terminal(),
      Stream::Stderr => std::io::stderr().is_terminal(),
    }
  }
}

fn fg(color: AnsiColor) -> Style {
  Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Applies styles only when the target stream is a color-capable terminal
#[derive(Debug, Clone, Copy)]
pub struct Paint {
  enabled: bool,
}

impl Paint {
  pub fn new(stream: Stream) -> Self {
    Self {
      enabled: stream.supports_color(),
    }
  }

  /// Plain painter, used by tests
  #[cfg(test)]
  pub fn plain() -> Self {
    Self { enabled: false }
  }

  fn apply(&self, style: Style, text: &str) -> String {
    if self.enabled {
      format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
      text.to_string()
    }
  }

  pub fn progress(&self, text: &str) -> String {
    self.apply(fg(AnsiColor::Yellow), text)
  }

  pub fn dim(&self, text: &str) -> String {
    self.apply(Style::new().dimmed(), text)
  }

  pub fn success(&self, text: &str) -> String {
    self.apply(fg(AnsiColor::Green).bold(), text)
  }

  pub fn error(&self, text: &str) -> String {
    self.apply(fg(AnsiColor::Red).bold(), text)
  }
}

/// Styles for clap's generated help
pub fn cli_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(fg(AnsiColor::Yellow).bold().underline())
    .header(fg(AnsiColor::Yellow).bold().underline())
    .literal(fg(AnsiColor::Green))
    .invalid(fg(AnsiColor::Red).bold())
    .error(fg(AnsiColor::Red).bold())
    .valid(fg(AnsiColor::Green).bold().underline())
    .placeholder(fg(AnsiColor::White))
}
