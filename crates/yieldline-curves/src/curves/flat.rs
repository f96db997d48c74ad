//! Flat curve.

use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::traits::{check_tenor, BenchmarkCurve};

/// A curve with the same continuously compounded rate at every tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatCurve {
    rate: f64,
}

impl FlatCurve {
    /// Creates a flat curve at `rate` (decimal, continuously compounded).
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The curve rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl BenchmarkCurve for FlatCurve {
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        check_tenor(t)?;
        Ok(self.rate)
    }

    fn name(&self) -> &str {
        "flat"
    }
}
