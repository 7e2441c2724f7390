use thiserror::Error;

use crate::trace::IterationTrace;

/// Unified error type for `annuity_fixpoint` operations.
#[derive(Clone, Debug, Error)]
pub enum IterationError {
    /// Raised before iterating when an input or configuration value is unusable.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was supplied.
        value: f64,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },

    /// Raised when the recurrence yields NaN or an infinity.
    #[error("recurrence produced a non-finite value at iteration {iteration} (input {input})")]
    NumericDivergence {
        /// Index of the step whose output was non-finite.
        iteration: usize,
        /// Value fed into the recurrence at that step.
        input: f64,
    },

    /// Raised when the iteration cap is reached without meeting the tolerance.
    #[error(
        "fixed-point iteration did not converge after {iterations} iterations; last gap {last_gap}"
    )]
    NonConvergence {
        /// Number of recurrence applications performed.
        iterations: usize,
        /// Absolute change observed in the final step.
        last_gap: f64,
        /// Every record produced before the cap was hit.
        trace: IterationTrace,
    },

    /// Raised when raw records do not form a valid trace.
    #[error("malformed trace at record {index}: {reason}")]
    MalformedTrace { index: usize, reason: &'static str },
}

impl IterationError {
    /// Helper to format an [`InvalidParameter`](IterationError::InvalidParameter) error.
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Helper to reject reconstructed traces that break an invariant.
    pub fn malformed(index: usize, reason: &'static str) -> Self {
        Self::MalformedTrace { index, reason }
    }

    /// Partial trace attached to a [`NonConvergence`](IterationError::NonConvergence) error.
    pub fn partial_trace(&self) -> Option<&IterationTrace> {
        match self {
            Self::NonConvergence { trace, .. } => Some(trace),
            _ => None,
        }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, IterationError>;
