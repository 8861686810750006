//! Durable checkpoints of the recurrence state.
//!
//! A checkpoint is one line of six whitespace-separated numbers in the fixed
//! order `sum q m k l x`. Rationals are written as `numerator/denominator` in
//! lowest terms (bare integer when the denominator is one); integers in
//! decimal. There is no version field: a different layout is a different
//! format and is rejected as malformed.
//!
//! # Key Components
//!
//! - [`encode`] / [`decode`]: text form of a [`RecurrenceState`](crate::RecurrenceState)
//! - [`CheckpointStore`]: checkpoint and result files on disk
//!
//! # Example
//!
//! ```rust
//! use series_engine::checkpoint::{decode, encode};
//! use series_engine::RecurrenceState;
//!
//! let mut state = RecurrenceState::initial();
//! state.advance();
//!
//! let record = encode(&state);
//! assert_eq!(decode(&record).unwrap(), state);
//! ```

mod record;
mod store;

pub use record::{decode, encode, FIELD_COUNT, FIELD_NAMES};
pub use store::CheckpointStore;
