//! Error types for checkpoint persistence.
//!
//! Arithmetic on the recurrence is infallible, so the only failures in this
//! crate come from reading and writing state:
//! - `Persistence`: a checkpoint or result file could not be opened, read or written
//! - `MalformedState`: checkpoint content does not decode into a recurrence state

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving series state.
///
/// # Examples
/// ```
/// use series_engine::StateError;
///
/// let err = StateError::MalformedState("expected 6 fields, found 2".to_string());
/// assert_eq!(format!("{}", err), "Malformed state: expected 6 fields, found 2");
/// ```
#[derive(Debug, Error)]
pub enum StateError {
    /// Storage I/O fault on a checkpoint or result file.
    #[error("Could not {action} {}: {source}", .path.display())]
    Persistence {
        /// Operation that failed, e.g. "open" or "write"
        action: &'static str,
        /// File involved in the failure
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Checkpoint content that does not decode into exactly one state.
    #[error("Malformed state: {0}")]
    MalformedState(String),
}

impl StateError {
    /// Builds a persistence error for `path`.
    pub fn persistence(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Persistence {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Persistence { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
