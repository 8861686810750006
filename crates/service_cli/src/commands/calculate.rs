//! Calculate command implementation
//!
//! Advances the series by a fixed number of terms and checkpoints the result.

use tracing::info;

use super::resume_driver;
use crate::config::CliConfig;
use crate::Result;

/// Run the calculate command
pub fn run(config: &CliConfig, steps: u64) -> Result<()> {
    let mut driver = resume_driver(config)?;

    info!("Calculating {} term(s) from q = {}", steps, driver.q());
    driver.step_batch(steps);

    info!("Saving state at q = {}", driver.q());
    driver.checkpoint()?;

    Ok(())
}
