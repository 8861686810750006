//! # series_engine: Checkpointed Chudnovsky Series Kernel
//!
//! ## Layer P Role
//!
//! series_engine is the numerical kernel of the workspace. It provides:
//! - The exact-arithmetic term recurrence (`recurrence`)
//! - A closed-form factorial reference used for cross-checking (`reference`)
//! - Conversion of the exact partial sum into decimal digits (`digits`)
//! - Checkpoint record encoding and durable file storage (`checkpoint`)
//! - The state driver tying these together (`driver`)
//!
//! ## Exact Arithmetic
//!
//! Every field of the recurrence is an arbitrary-precision integer or rational
//! (`num-bigint` / `num-rational`). No rounding is ever applied to the running
//! sum; the only inexact step is the final truncation to a decimal string.
//!
//! ## Usage Example
//!
//! ```rust
//! use series_engine::RecurrenceState;
//!
//! let mut state = RecurrenceState::initial();
//! state.advance();
//!
//! let pi = state.extract_digits();
//! assert!(pi.starts_with("3.14159265358979"));
//! ```
//!
//! ## Parallelism
//!
//! A single `advance()` may run its independent field updates on the rayon
//! pool (see [`recurrence::AdvanceMode`]). The numeric result is identical to
//! sequential execution.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod checkpoint;
pub mod constants;
pub mod digits;
pub mod driver;
pub mod error;
pub mod recurrence;
pub mod reference;

pub use checkpoint::CheckpointStore;
pub use driver::SeriesDriver;
pub use error::{StateError, StateResult};
pub use recurrence::{AdvanceMode, RecurrenceState};
