use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-invocation switches taken from the command line
///
/// Built once in `main` and passed by reference; nothing reads these from the
/// environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
  pub dry_run: bool,
  pub verbose: bool,
}

/// Configuration for release-rail
/// Searched in order: release.toml, .release.toml, .config/release.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub branches: BranchConfig,
  #[serde(default)]
  pub remote: RemoteConfig,
  #[serde(default)]
  pub build: BuildConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchConfig {
  /// Long-lived publishable branch (default: "master")
  #[serde(default = "default_release_branch")]
  pub release: String,

  /// Branch merged into the release branch (default: "dev")
  #[serde(default = "default_development_branch")]
  pub development: String,
}

fn default_release_branch() -> String {
  "master".to_string()
}

fn default_development_branch() -> String {
  "dev".to_string()
}

impl Default for BranchConfig {
  fn default() -> Self {
    Self {
      release: default_release_branch(),
      development: default_development_branch(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
  /// Remote fetched from and pushed to (default: "origin")
  #[serde(default = "default_remote_name")]
  pub name: String,
}

fn default_remote_name() -> String {
  "origin".to_string()
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self {
      name: default_remote_name(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
  /// Build invocation as argv (default: ["poetry", "build"])
  #[serde(default = "default_build_command")]
  pub command: Vec<String>,

  /// Build output staged after a successful build (default: "dist")
  #[serde(default = "default_build_output")]
  pub output: PathBuf,
}

fn default_build_command() -> Vec<String> {
  vec!["poetry".to_string(), "build".to_string()]
}

fn default_build_output() -> PathBuf {
  PathBuf::from("dist")
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      command: default_build_command(),
      output: default_build_output(),
    }
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> ReleaseError {
  ReleaseError::Config(ConfigError::Invalid {
    field: field.to_string(),
    reason: reason.into(),
  })
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for a repository root
  ///
  /// An explicit path must exist. Without one, the search locations are
  /// tried and built-in defaults are used when none exists.
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<(Self, Option<PathBuf>)> {
    let config_path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(ReleaseError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        Some(path.to_path_buf())
      }
      None => Self::find_config_path(root),
    };

    let Some(config_path) = config_path else {
      let config = Self::default();
      return Ok((config, None));
    };

    let config = Self::load_file(&config_path)?;
    Ok((config, Some(config_path)))
  }

  /// Parse and validate a single config file
  pub fn load_file(config_path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Save config to release.toml, refusing to overwrite
  pub fn save_new(&self, root: &Path) -> ReleaseResult<PathBuf> {
    let config_path = root.join("release.toml");
    if config_path.exists() {
      return Err(ReleaseError::Config(ConfigError::AlreadyExists { path: config_path }));
    }
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  /// Check the fields the runner relies on
  pub fn validate(&self) -> ReleaseResult<()> {
    let release = self.branches.release.trim();
    let development = self.branches.development.trim();

    if release.is_empty() {
      return Err(invalid("branches.release", "must not be empty"));
    }
    if development.is_empty() {
      return Err(invalid("branches.development", "must not be empty"));
    }
    if release == development {
      return Err(invalid(
        "branches.development",
        format!("must differ from the release branch '{}'", release),
      ));
    }
    if self.remote.name.trim().is_empty() {
      return Err(invalid("remote.name", "must not be empty"));
    }
    if self.build.command.first().is_none_or(|program| program.trim().is_empty()) {
      return Err(invalid("build.command", "must name a program to run"));
    }
    if self.build.output.as_os_str().is_empty() {
      return Err(invalid("build.output", "must not be empty"));
    }
    if self.build.output.is_absolute() {
      return Err(invalid("build.output", "must be relative to the repository root"));
    }

    Ok(())
  }
}
