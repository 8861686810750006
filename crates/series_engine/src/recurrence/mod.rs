//! Exact-arithmetic term recurrence for the Chudnovsky series.
//!
//! # Overview
//!
//! Evaluating the closed-form term `(6q)! / ((3q)! (q!)^3)` directly costs a
//! full factorial per step. The recurrence instead carries the ratio of
//! consecutive coefficients in `m`, so each step performs a constant number
//! of big-number operations whose operands grow only as fast as the target
//! precision requires.
//!
//! # Key Components
//!
//! - [`RecurrenceState`]: the six evolving fields and the `advance` operation
//! - [`AdvanceMode`]: sequential or fork-join execution of a single advance
//!
//! # Update Order
//!
//! One advance is split into two phases separated by a barrier:
//!
//! 1. `sum += m * l / x` and `k += 12`
//! 2. `m *= (k^3 - 16k) / (q + 1)^3` using the *new* `k` and the *old* `q`,
//!    `l += 545140134`, `x *= -262537412640768000`
//!
//! `q` is incremented after the second barrier. Reordering these phases still
//! produces a converging series, but to the wrong value.

mod phases;
mod state;

pub use state::RecurrenceState;

/// Execution strategy for a single [`RecurrenceState::advance_with`] call.
///
/// Both modes produce bit-identical states. `ForkJoin` runs the independent
/// field updates of each phase on the rayon pool, which shortens wall-clock
/// time once operands reach millions of digits.
///
/// # Examples
///
/// ```
/// use series_engine::{AdvanceMode, RecurrenceState};
///
/// let mut a = RecurrenceState::initial();
/// let mut b = RecurrenceState::initial();
/// a.advance_with(AdvanceMode::Sequential);
/// b.advance_with(AdvanceMode::ForkJoin);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdvanceMode {
    /// All field updates on the calling thread.
    Sequential,

    /// Two fork-join phases on the rayon pool.
    #[default]
    ForkJoin,
}

impl AdvanceMode {
    /// Returns the configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvanceMode::Sequential => "sequential",
            AdvanceMode::ForkJoin => "fork-join",
        }
    }
}

impl std::str::FromStr for AdvanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "serial" => Ok(AdvanceMode::Sequential),
            "fork-join" | "forkjoin" | "parallel" => Ok(AdvanceMode::ForkJoin),
            other => Err(format!(
                "Unknown advance mode: {}. Supported: sequential, fork-join",
                other
            )),
        }
    }
}

impl std::fmt::Display for AdvanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
