//! Checkpoint and result files.
//!
//! Both files are written whole: content goes to a sibling `.tmp` file which
//! is flushed, synced and renamed over the destination. A crash mid-write
//! leaves the previous checkpoint intact. No handle outlives a single call.

use super::record::{decode, encode};
use crate::error::{StateError, StateResult};
use crate::recurrence::RecurrenceState;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default checkpoint file name.
pub const DEFAULT_STATE_PATH: &str = "state";

/// Default result file name.
pub const DEFAULT_RESULT_PATH: &str = "result";

/// Location of the checkpoint and result files for one run.
///
/// # Example
///
/// ```rust,no_run
/// use series_engine::{CheckpointStore, RecurrenceState};
///
/// let store = CheckpointStore::new("state", "result");
/// let mut state = store.read()?;
/// state.advance();
/// store.write(&state)?;
/// # Ok::<(), series_engine::StateError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointStore {
    state_path: PathBuf,
    result_path: PathBuf,
}

impl CheckpointStore {
    /// Creates a store for the given checkpoint and result paths.
    pub fn new(state_path: impl Into<PathBuf>, result_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
            result_path: result_path.into(),
        }
    }

    /// Path of the checkpoint file.
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Path of the result file.
    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    /// Returns true if a checkpoint file is present.
    pub fn has_checkpoint(&self) -> bool {
        self.state_path.is_file()
    }

    /// Reads and decodes the checkpoint file.
    ///
    /// # Errors
    ///
    /// - [`StateError::Persistence`] if the file is absent or unreadable
    /// - [`StateError::MalformedState`] if the content does not decode
    pub fn read(&self) -> StateResult<RecurrenceState> {
        let path = &self.state_path;
        let mut file = File::open(path).map_err(|e| StateError::persistence("open", path, e))?;

        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| StateError::persistence("read", path, e))?;

        let state = decode(&text)?;
        debug!(path = %path.display(), q = state.q(), bytes = text.len(), "Checkpoint read");
        Ok(state)
    }

    /// Encodes `state` and replaces the checkpoint file with it.
    pub fn write(&self, state: &RecurrenceState) -> StateResult<()> {
        let record = encode(state);
        write_atomically(&self.state_path, &record)?;
        debug!(
            path = %self.state_path.display(),
            q = state.q(),
            bytes = record.len(),
            "Checkpoint written"
        );
        Ok(())
    }

    /// Replaces the result file with a decimal expansion.
    pub fn write_result(&self, digits: &str) -> StateResult<()> {
        write_atomically(&self.result_path, digits)?;
        debug!(
            path = %self.result_path.display(),
            digits = digits.len(),
            "Result written"
        );
        Ok(())
    }
}

impl Default for CheckpointStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_PATH, DEFAULT_RESULT_PATH)
    }
}

/// Writes `line` plus a newline to `path` via a temporary sibling file.
///
/// On failure the temporary file is removed and `path` is left as it was.
fn write_atomically(path: &Path, line: &str) -> StateResult<()> {
    let tmp_path = temporary_sibling(path);

    let result = write_synced(&tmp_path, line).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| StateError::persistence("replace", path, e))
    });

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %tmp_path.display(), error = %e, "Could not remove temporary file");
            }
        }
    }
    result
}

fn write_synced(tmp_path: &Path, line: &str) -> StateResult<()> {
    let file = File::create(tmp_path).map_err(|e| StateError::persistence("open", tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(line.as_bytes())
        .and_then(|_| writer.write_all(b"\n"))
        .and_then(|_| writer.flush())
        .map_err(|e| StateError::persistence("write", tmp_path, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| StateError::persistence("write", tmp_path, e.into_error()))?;
    file.sync_all()
        .map_err(|e| StateError::persistence("sync", tmp_path, e))
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("checkpoint"));
    name.push(".tmp");
    path.with_file_name(name)
}
