//! pidollars - Checkpointed π Computation
//!
//! This is the operational entry point for the series_engine library.
//!
//! # Commands
//!
//! - `pidollars` / `pidollars run` - Step continuously, checkpointing on an interval
//! - `pidollars calculate [--steps N]` - Advance a fixed number of terms and checkpoint
//! - `pidollars finalize` - Print the decimal approximation of the saved state
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate owns process concerns (argument
//! parsing, configuration, logging, exit status) and delegates all numerical
//! work to `series_engine`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod schedule;

use config::{CliConfig, CliOverrides};
pub use error::{CliError, Result};

/// Compute digits of π with the Chudnovsky series, resumably
#[derive(Parser)]
#[command(name = "pidollars")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Checkpoint file (overrides config)
    #[arg(long, global = true, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Result file (overrides config)
    #[arg(long, global = true, value_name = "FILE")]
    result: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step continuously, saving state and result on intervals (default)
    Run {
        /// Stop after this many seconds of wall-clock time
        #[arg(short, long)]
        duration_secs: Option<u64>,
    },

    /// Advance the saved state by a fixed number of terms
    Calculate {
        /// Number of terms to add
        #[arg(short = 'n', long, default_value = "1")]
        steps: u64,
    },

    /// Print the decimal approximation of the saved state
    Finalize {
        /// Also write the approximation to the result file
        #[arg(short, long)]
        write_result: bool,
    },
}

fn init_tracing(log_level: LevelFilter) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_thread_pool(threads: Option<usize>) -> Result<()> {
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| CliError::ThreadPool(e.to_string()))?;
        debug!(threads = n, "Configured worker pool");
    }
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.merge_with_cli(&CliOverrides {
        state_path: cli.state,
        result_path: cli.result,
        verbose: cli.verbose,
    });

    init_tracing(config.log_level);
    init_thread_pool(config.threads)?;

    info!(
        state = %config.state_path.display(),
        result = %config.result_path.display(),
        parallelism = %config.parallelism,
        "Configuration loaded"
    );

    match cli.command {
        None => commands::run::run(&config, None),
        Some(Commands::Run { duration_secs }) => {
            commands::run::run(&config, duration_secs.map(Duration::from_secs))
        }
        Some(Commands::Calculate { steps }) => commands::calculate::run(&config, steps),
        Some(Commands::Finalize { write_result }) => {
            commands::finalize::run(&config, write_result)
        }
    }
}

fn main() -> ExitCode {
    match execute(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
