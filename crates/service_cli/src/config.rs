//! Run configuration management
//!
//! Handles loading configuration from a TOML file and CLI arguments.

use serde::Deserialize;
use series_engine::checkpoint::CheckpointStore;
use series_engine::AdvanceMode;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "pidollars.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("Invalid {name}: {value}. Must be at least 1 second")]
    InvalidInterval { name: &'static str, value: u64 },

    #[error("Invalid thread count: {0}. Must be at least 1")]
    InvalidThreads(usize),

    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a `pidollars` run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Checkpoint file
    pub state_path: PathBuf,
    /// Result file
    pub result_path: PathBuf,
    /// Seconds between checkpoints in the run loop
    pub state_save_interval_secs: u64,
    /// Seconds between result writes in the run loop
    pub result_save_interval_secs: u64,
    /// Advance execution mode
    #[serde(deserialize_with = "deserialize_parallelism")]
    pub parallelism: AdvanceMode,
    /// Worker pool size for fork-join advance (rayon default when unset)
    pub threads: Option<usize>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LevelFilter,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LevelFilter::from_str(&s)
        .map_err(|_| serde::de::Error::custom(ConfigError::InvalidLogLevel(s)))
}

fn deserialize_parallelism<'de, D>(deserializer: D) -> Result<AdvanceMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    AdvanceMode::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("state"),
            result_path: PathBuf::from("result"),
            state_save_interval_secs: 60,
            result_save_interval_secs: 600,
            parallelism: AdvanceMode::ForkJoin,
            threads: None,
            log_level: LevelFilter::INFO,
        }
    }
}

impl CliConfig {
    /// Load configuration from an explicit path, or from
    /// [`DEFAULT_CONFIG_PATH`] if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_save_interval_secs == 0 {
            return Err(ConfigError::InvalidInterval {
                name: "state_save_interval_secs",
                value: 0,
            });
        }
        if self.result_save_interval_secs == 0 {
            return Err(ConfigError::InvalidInterval {
                name: "result_save_interval_secs",
                value: 0,
            });
        }
        if let Some(0) = self.threads {
            return Err(ConfigError::InvalidThreads(0));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(state) = &cli.state_path {
            self.state_path = state.clone();
        }
        if let Some(result) = &cli.result_path {
            self.result_path = result.clone();
        }
        if cli.verbose {
            self.log_level = LevelFilter::DEBUG;
        }
    }

    /// Checkpoint interval as a duration
    pub fn state_save_interval(&self) -> Duration {
        Duration::from_secs(self.state_save_interval_secs)
    }

    /// Result interval as a duration
    pub fn result_save_interval(&self) -> Duration {
        Duration::from_secs(self.result_save_interval_secs)
    }

    /// Checkpoint store for the configured paths
    pub fn store(&self) -> CheckpointStore {
        CheckpointStore::new(&self.state_path, &self.result_path)
    }
}

/// Values given on the command line that override the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Checkpoint file override
    pub state_path: Option<PathBuf>,
    /// Result file override
    pub result_path: Option<PathBuf>,
    /// Force debug logging
    pub verbose: bool,
}
