//! Core engine for release-rail
//!
//! - **build**: package build collaborator (`BuildTool`, `CommandBuild`)
//! - **config**: run switches and release.toml parsing/validation
//! - **context**: repository + config, built once per invocation
//! - **error**: error taxonomy and exit codes
//! - **plan**: the fixed release sequence
//! - **prompt**: commit-message prompt for the recovery path
//! - **runner**: guarded sequential execution of a plan
//! - **vcs**: version-control collaborator (`VersionControl`, `SystemGit`)

pub mod build;
pub mod config;
pub mod context;
pub mod error;
pub mod plan;
pub mod prompt;
pub mod runner;
pub mod vcs;
