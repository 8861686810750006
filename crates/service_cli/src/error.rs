//! CLI error types

use series_engine::StateError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `pidollars` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Checkpoint or result file failure
    #[error(transparent)]
    State(#[from] StateError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool could not be created
    #[error("Could not build worker pool: {0}")]
    ThreadPool(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
