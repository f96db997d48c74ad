//! Error types for curve operations.

use thiserror::Error;
use yieldline_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Negative or non-finite tenor.
    #[error("Invalid tenor: {tenor}")]
    InvalidTenor {
        /// The requested tenor in years.
        tenor: f64,
    },

    /// Curve pillars could not be used to build a curve.
    #[error("Invalid curve pillars: {reason}")]
    InvalidPillars {
        /// Description of the problem.
        reason: String,
    },

    /// Pillar file could not be decoded.
    #[error("Cannot decode curve pillars: {0}")]
    Decode(String),

    /// Interpolation failed.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid pillars error.
    #[must_use]
    pub fn invalid_pillars(reason: impl Into<String>) -> Self {
        Self::InvalidPillars {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
