//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod calculate;
pub mod finalize;
pub mod run;

use series_engine::SeriesDriver;

use crate::config::CliConfig;
use crate::Result;

/// Loads the configured checkpoint, or starts at q = 0 if there is none.
fn resume_driver(config: &CliConfig) -> Result<SeriesDriver> {
    let driver = SeriesDriver::load_or_initial(config.store())?;
    Ok(driver.with_mode(config.parallelism))
}
