//! Wall-clock save schedule for the run loop.
//!
//! A save is due once its interval has elapsed since the previous save *and*
//! the series has advanced since then; an idle interval never rewrites an
//! identical file.

use std::time::{Duration, Instant};

/// Tracks when a periodic save last happened.
///
/// # Examples
///
/// ```ignore
/// let start = Instant::now();
/// let mut schedule = SaveSchedule::new(Duration::from_secs(60), start, 0);
///
/// assert!(!schedule.is_due(start, 5));
/// assert!(schedule.is_due(start + Duration::from_secs(60), 5));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SaveSchedule {
    /// Minimum time between saves
    interval: Duration,
    /// Time of the previous save (or of the run start)
    last_at: Instant,
    /// Term count at the previous save
    last_q: u64,
}

impl SaveSchedule {
    /// Creates a schedule whose first save is one interval after `start`.
    pub fn new(interval: Duration, start: Instant, start_q: u64) -> Self {
        Self {
            interval,
            last_at: start,
            last_q: start_q,
        }
    }

    /// Returns true if a save should happen at `now` for term count `q`.
    pub fn is_due(&self, now: Instant, q: u64) -> bool {
        q != self.last_q && now.saturating_duration_since(self.last_at) >= self.interval
    }

    /// Records a save at `now` for term count `q`.
    pub fn mark(&mut self, now: Instant, q: u64) {
        self.last_at = now;
        self.last_q = q;
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
