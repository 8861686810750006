//! State driver for checkpointed runs.
//!
//! [`SeriesDriver`] owns one [`RecurrenceState`] for the lifetime of a run
//! together with the [`CheckpointStore`] it persists to. It is the only
//! component that mutates the state, and it does so only through
//! [`SeriesDriver::step`] and [`SeriesDriver::step_batch`].

use crate::checkpoint::CheckpointStore;
use crate::digits;
use crate::error::StateResult;
use crate::recurrence::{AdvanceMode, RecurrenceState};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Owns the recurrence state and its checkpoint location.
///
/// # Example
///
/// ```rust,no_run
/// use series_engine::{CheckpointStore, SeriesDriver};
///
/// let store = CheckpointStore::new("state", "result");
/// let mut driver = SeriesDriver::load_or_initial(store)?;
///
/// driver.step_batch(100);
/// driver.checkpoint()?;
/// println!("{}", driver.extract_digits());
/// # Ok::<(), series_engine::StateError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SeriesDriver {
    /// Recurrence owned by this run
    state: RecurrenceState,

    /// Where checkpoints and results go
    store: CheckpointStore,

    /// Execution mode for each advance
    mode: AdvanceMode,
}

impl SeriesDriver {
    /// Creates a driver around an existing state.
    pub fn new(store: CheckpointStore, state: RecurrenceState) -> Self {
        Self {
            state,
            store,
            mode: AdvanceMode::default(),
        }
    }

    /// Creates a driver at the canonical starting state.
    pub fn initial(store: CheckpointStore) -> Self {
        Self::new(store, RecurrenceState::initial())
    }

    /// Creates a driver from the store's checkpoint file.
    ///
    /// # Errors
    ///
    /// Fails if the checkpoint is absent, unreadable or malformed.
    pub fn load(store: CheckpointStore) -> StateResult<Self> {
        let state = store.read()?;
        info!(
            path = %store.state_path().display(),
            q = state.q(),
            "Loaded checkpoint"
        );
        Ok(Self::new(store, state))
    }

    /// Like [`SeriesDriver::load`], but starts fresh when no checkpoint exists.
    ///
    /// Any failure other than a missing file is still returned.
    pub fn load_or_initial(store: CheckpointStore) -> StateResult<Self> {
        match Self::load(store.clone()) {
            Ok(driver) => Ok(driver),
            Err(err) if err.is_not_found() => {
                warn!(
                    path = %store.state_path().display(),
                    "No checkpoint found, starting from q = 0"
                );
                Ok(Self::initial(store))
            }
            Err(err) => Err(err),
        }
    }

    /// Sets the advance mode (builder pattern).
    pub fn with_mode(mut self, mode: AdvanceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the advance mode.
    pub fn set_mode(&mut self, mode: AdvanceMode) {
        self.mode = mode;
    }

    /// Returns the advance mode.
    pub fn mode(&self) -> AdvanceMode {
        self.mode
    }

    /// Returns the current state.
    pub fn state(&self) -> &RecurrenceState {
        &self.state
    }

    /// Returns the checkpoint store.
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// Number of terms folded into the sum so far.
    pub fn q(&self) -> u64 {
        self.state.q()
    }

    /// Replaces the current state with the one on disk.
    ///
    /// On failure the current state is left untouched.
    pub fn read(&mut self) -> StateResult<()> {
        let state = self.store.read()?;
        debug!(from = self.state.q(), to = state.q(), "Reloaded checkpoint");
        self.state = state;
        Ok(())
    }

    /// Advances the series by one term.
    pub fn step(&mut self) {
        self.state.advance_with(self.mode);
    }

    /// Advances the series by `n` terms, one after another.
    pub fn step_batch(&mut self, n: u64) {
        let start = Instant::now();
        let from = self.state.q();

        self.state.advance_by(n, self.mode);

        info!(
            from,
            to = self.state.q(),
            mode = %self.mode,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Step batch complete"
        );
    }

    /// Writes the current state to the checkpoint file.
    ///
    /// Does not modify the state.
    pub fn checkpoint(&self) -> StateResult<()> {
        self.store.write(&self.state)
    }

    /// Decimal approximation of π for the current state.
    pub fn extract_digits(&self) -> String {
        let start = Instant::now();
        let result = self.state.extract_digits();
        debug!(
            q = self.state.q(),
            precision_bits = digits::precision_bits(self.state.q()),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extracted digits"
        );
        result
    }

    /// Extracts digits and writes them to the result file.
    ///
    /// Returns the digits written.
    pub fn save_result(&self) -> StateResult<String> {
        let result = self.extract_digits();
        self.store.write_result(&result)?;
        Ok(result)
    }
}
