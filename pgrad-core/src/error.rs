//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PgError {
    /// An array did not have the expected length or shape.
    #[error("Dimension mismatch in {what}: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// What was being checked, e.g. `"state"`.
        what: String,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// An action index outside of `[0, n_actions)`.
    #[error("Invalid action {action}, the number of actions is {n_actions}")]
    InvalidAction {
        /// The offending action.
        action: usize,
        /// Number of actions of the policy.
        n_actions: usize,
    },

    /// NaN or infinity detected in a probability vector or a gradient.
    #[error("Non-finite value in {0}")]
    NonFinite(String),

    /// A configuration value out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `step()` was called on an environment whose episode has ended.
    #[error("Episode has already finished, call reset() first")]
    EpisodeFinished,

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl PgError {
    /// Shorthand for [`PgError::DimensionMismatch`].
    pub fn dim(what: impl Into<String>, expected: &[usize], got: &[usize]) -> Self {
        Self::DimensionMismatch {
            what: what.into(),
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}
