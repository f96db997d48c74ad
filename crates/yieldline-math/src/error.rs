//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by root finders and interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (last x: {last:.6e}, residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last iterate.
        last: f64,
        /// Residual at the last iterate.
        residual: f64,
    },

    /// Derivative vanished or became non-finite.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The offending derivative value.
        value: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, last: f64, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            last,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
