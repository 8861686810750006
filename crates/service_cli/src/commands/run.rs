//! Run command implementation
//!
//! Steps the series continuously, checkpointing and writing results on
//! wall-clock intervals. Runs until the optional time limit runs out or the
//! process is stopped; at most one checkpoint interval of work is lost on a
//! hard stop.

use std::time::{Duration, Instant};

use tracing::info;

use super::resume_driver;
use crate::config::CliConfig;
use crate::schedule::SaveSchedule;
use crate::Result;

/// Run the continuous computation loop
pub fn run(config: &CliConfig, time_limit: Option<Duration>) -> Result<()> {
    let mut driver = resume_driver(config)?;

    let started = Instant::now();
    let mut state_schedule = SaveSchedule::new(config.state_save_interval(), started, driver.q());
    let mut result_schedule =
        SaveSchedule::new(config.result_save_interval(), started, driver.q());

    info!(
        q = driver.q(),
        mode = %driver.mode(),
        state_interval_secs = config.state_save_interval_secs,
        result_interval_secs = config.result_save_interval_secs,
        time_limit_secs = time_limit.map(|d| d.as_secs()),
        "Starting run"
    );

    loop {
        let now = Instant::now();
        if time_limit.is_some_and(|limit| now.duration_since(started) >= limit) {
            break;
        }

        let q = driver.q();
        if state_schedule.is_due(now, q) {
            info!("Saving state at q = {}", q);
            driver.checkpoint()?;
            state_schedule.mark(Instant::now(), q);
        }

        if result_schedule.is_due(now, q) {
            info!("Saving result at q = {}", q);
            driver.save_result()?;
            result_schedule.mark(Instant::now(), q);
        }

        driver.step();
    }

    info!("Time limit reached, saving state at q = {}", driver.q());
    driver.checkpoint()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use series_engine::SeriesDriver;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> CliConfig {
        CliConfig {
            state_path: dir.path().join("state"),
            result_path: dir.path().join("result"),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_time_limit_checkpoints_initial_state() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        run(&config, Some(Duration::ZERO)).unwrap();

        let driver = SeriesDriver::load(config.store()).unwrap();
        assert_eq!(driver.q(), 0);
        assert!(!config.result_path.exists());
    }

    #[test]
    fn test_short_run_makes_progress_and_resumes() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        run(&config, Some(Duration::from_millis(200))).unwrap();
        let first = SeriesDriver::load(config.store()).unwrap().q();
        assert!(first > 0);

        run(&config, Some(Duration::from_millis(100))).unwrap();
        let second = SeriesDriver::load(config.store()).unwrap().q();
        assert!(second > first);
    }
}
