//! Error types for the analytics layer.
//!
//! Solver failures are kept apart from arithmetic failures so a caller can
//! decide which ones allow a degraded result.

use thiserror::Error;
use yieldline_bonds::error::{AccrualError, InvalidDateError};

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Failures of the iterative yield and spread searches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The search exhausted its iteration cap or hit a flat derivative.
    #[error("{target} search did not converge after {iterations} iterations (last value {last:.6})")]
    NonConvergent {
        /// What was being solved for ("yield", "z-spread").
        target: &'static str,
        /// Iterations performed.
        iterations: u32,
        /// Last iterate.
        last: f64,
    },

    /// The solved yield is below zero.
    #[error("solved yield {ytm:.6} is negative")]
    NegativeYield {
        /// The solved yield.
        ytm: f64,
    },
}

impl SolverError {
    /// Creates a non-convergence error.
    #[must_use]
    pub fn non_convergent(target: &'static str, iterations: u32, last: f64) -> Self {
        Self::NonConvergent {
            target,
            iterations,
            last,
        }
    }
}

/// Arithmetic domain failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// A coupon period with no days in it.
    #[error("zero-length period: {0}")]
    ZeroPeriod(String),

    /// Prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: f64,
    },

    /// Nothing left to discount after settlement.
    #[error("no cash flows after settlement")]
    NoFutureCashFlows,

    /// Any other value outside its domain.
    #[error("{0}")]
    Domain(String),
}

impl CalculationError {
    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain(reason.into())
    }
}

/// Unified error type for analytics operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Yield or spread search failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Arithmetic failure.
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Settlement on or after maturity.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
}

impl From<AccrualError> for AnalyticsError {
    fn from(err: AccrualError) -> Self {
        match err {
            AccrualError::ZeroPeriod { .. } => {
                CalculationError::ZeroPeriod(err.to_string()).into()
            }
        }
    }
}

impl From<yieldline_curves::CurveError> for AnalyticsError {
    fn from(err: yieldline_curves::CurveError) -> Self {
        CalculationError::domain(format!("curve: {err}")).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldline_core::Date;

    #[test]
    fn test_error_display() {
        let err = SolverError::non_convergent("yield", 100, 0.5);
        assert!(err.to_string().contains("100 iterations"));

        let err = CalculationError::NonPositivePrice { price: -1.0 };
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_accrual_error_maps_to_zero_period() {
        let d = Date::from_ymd(2025, 1, 1).unwrap();
        let err: AnalyticsError = AccrualError::ZeroPeriod { start: d, end: d }.into();
        assert!(matches!(
            err,
            AnalyticsError::Calculation(CalculationError::ZeroPeriod(_))
        ));
    }
}
