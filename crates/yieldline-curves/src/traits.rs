//! Benchmark curve interface.

use crate::error::{CurveError, CurveResult};

/// A benchmark yield curve as seen by the spread engine.
///
/// Rates are continuously compounded decimals keyed by time in years from the
/// valuation date. Implementations are read-only snapshots shared across
/// worker threads.
pub trait BenchmarkCurve: Send + Sync {
    /// Continuously compounded zero rate for a tenor in years.
    fn zero_rate(&self, t: f64) -> CurveResult<f64>;

    /// Discount factor `exp(-r(t) t)`.
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        check_tenor(t)?;
        Ok((-self.zero_rate(t)? * t).exp())
    }

    /// Short description used in logs.
    fn name(&self) -> &str {
        "benchmark"
    }
}

impl<C: BenchmarkCurve + ?Sized> BenchmarkCurve for &C {
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        (**self).zero_rate(t)
    }

    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(t)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: BenchmarkCurve + ?Sized> BenchmarkCurve for std::sync::Arc<C> {
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        (**self).zero_rate(t)
    }

    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(t)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Rejects negative and non-finite tenors.
pub(crate) fn check_tenor(t: f64) -> CurveResult<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(CurveError::InvalidTenor { tenor: t })
    }
}
