//! Finalize command implementation
//!
//! Prints the decimal approximation for the saved state without advancing it.

use series_engine::SeriesDriver;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the finalize command
pub fn run(config: &CliConfig, write_result: bool) -> Result<()> {
    let digits = render(config, write_result)?;
    println!("{}", digits);
    Ok(())
}

/// Loads the checkpoint and returns its decimal expansion.
///
/// A checkpoint must exist; there is nothing to finalize otherwise.
fn render(config: &CliConfig, write_result: bool) -> Result<String> {
    let driver = SeriesDriver::load(config.store())?;

    if write_result {
        info!("Saving result at q = {}", driver.q());
        return Ok(driver.save_result()?);
    }

    Ok(driver.extract_digits())
}
