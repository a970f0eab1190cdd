//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum DsqlError {
    /// Temperature of the soft-maximum operator is not strictly positive.
    #[error("alpha must be positive and finite, got {0}")]
    InvalidAlpha(f64),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fields of a transition batch do not share the same length.
    #[error("Batch size mismatch in {field}: expected {expected}, got {actual}")]
    BatchSizeMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Length of `reward`.
        expected: usize,
        /// Length of the offending field.
        actual: usize,
    },

    /// A recurrent model was given a batch without recurrent states.
    #[error("Recurrent model requires next_recurrent_state in the batch")]
    MissingRecurrentState,
}
