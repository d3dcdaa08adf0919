//! Engine error taxonomy
//!
//! All user-facing failures cross the facade boundary as explicit values.
//! Artifact *load* failures are deliberately absent here: a missing or
//! unreadable checkpoint is an expected cold start, handled inside
//! `regressor::load_or_untrained` and never surfaced to callers.

use thiserror::Error;

use crate::regressor::checkpoint::CheckpointError;

/// Errors returned by the prediction facade and training lifecycle.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A numeric input was non-finite or out of its valid domain.
    #[error("invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Training was requested with too few accumulated measurements.
    /// Recoverable — add more measurements and retry.
    #[error("insufficient training data: have {have} measurements, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    /// The regressor artifact could not be written.
    ///
    /// Only save-path failures reach callers, and only as a warning-grade
    /// outcome: the in-memory fit that preceded the save remains valid.
    #[error("checkpoint persistence failed: {0}")]
    Persistence(#[from] CheckpointError),
}
