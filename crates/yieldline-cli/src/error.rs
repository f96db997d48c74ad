//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid coupon rate.
    #[error("Invalid coupon rate: {0}. Must be between 0 and 100.")]
    InvalidCoupon(f64),

    /// Invalid curve rate.
    #[error("Invalid curve rate: {0}. Must be between -10 and 100.")]
    InvalidCurveRate(f64),

    /// Coupon and maturity must come together.
    #[error("--coupon and --maturity must be given together")]
    IncompleteTerms,

    /// Reference data could not be loaded.
    #[error("Cannot load {what} from {path}: {reason}")]
    ReferenceData {
        /// What was being loaded.
        what: &'static str,
        /// File path.
        path: String,
        /// Underlying problem.
        reason: String,
    },

    /// A portfolio row could not be read.
    #[error("Row {row}: {reason}")]
    InvalidRow {
        /// One-based data row number.
        row: usize,
        /// What is wrong with it.
        reason: String,
    },
}

impl CliError {
    /// Creates a reference data error.
    pub fn reference_data(what: &'static str, path: &str, reason: impl ToString) -> Self {
        Self::ReferenceData {
            what,
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
