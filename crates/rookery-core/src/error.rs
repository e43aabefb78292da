//! Error types for decoding driver input.
//!
//! Simulation-level misbehavior (eating while full, feeding while empty,
//! removing a fish twice) is never an error; those are silent no-ops in
//! the engine. Errors here only cover input that cannot be interpreted
//! at all.

use thiserror::Error;

/// A raw action vector could not be decoded into an [`Action`](crate::Action).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ActionError {
    /// The vector does not have exactly [`ACTION_LEN`](crate::ACTION_LEN) entries.
    #[error("action vector must have {expected} values, got {got}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        got: usize,
    },
    /// An entry is NaN or infinite.
    #[error("action value at index {index} is not finite: {value}")]
    NonFinite {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f32,
    },
}
