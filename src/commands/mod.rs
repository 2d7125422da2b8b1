//! CLI commands for release-rail
//!
//! - **release**: run the guarded release sequence (the default command)
//! - **plan**: print the release sequence without touching the repository
//! - **init**: write a default release.toml

pub mod init;
pub mod plan;
pub mod release;

pub use init::run_init;
pub use plan::run_plan;
pub use release::run_release;
