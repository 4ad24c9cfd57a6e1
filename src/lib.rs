//! Jellyfin playlist ownership changer.
//!
//! This library exposes the internal modules for testing and for the
//! `jellyfin-chown-pl` binary.

pub mod chown;
pub mod config;
pub mod error;
pub mod library;
pub mod users;

// Re-export commonly used types for convenience
pub use chown::{execute, run, ChownOutcome, Selection};
pub use config::{AppConfig, CliConfig, EnvLookup, ProcessEnv};
pub use error::{ChownError, ChownResult, Phase};
