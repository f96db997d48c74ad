//! Zero curve on tenor pillars.

use serde::{Deserialize, Serialize};
use yieldline_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::{check_tenor, BenchmarkCurve};

/// One `(tenor, zero rate)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePillar {
    /// Tenor in years.
    pub tenor: f64,
    /// Continuously compounded zero rate, decimal.
    pub rate: f64,
}

/// Zero curve interpolated linearly in rate between pillars and held flat
/// beyond the first and last pillar.
///
/// ```rust
/// use yieldline_curves::prelude::*;
///
/// let curve = ZeroCurve::from_pillars(&[
///     CurvePillar { tenor: 2.0, rate: 0.040 },
///     CurvePillar { tenor: 10.0, rate: 0.045 },
/// ])
/// .unwrap();
/// assert!((curve.zero_rate(6.0).unwrap() - 0.0425).abs() < 1e-12);
/// assert!((curve.zero_rate(30.0).unwrap() - 0.045).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    pillars: Vec<CurvePillar>,
    interpolator: LinearInterpolator,
}

impl ZeroCurve {
    /// Builds a curve from pillars in any order. Tenors must be distinct.
    pub fn from_pillars(pillars: &[CurvePillar]) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::invalid_pillars("at least one pillar is required"));
        }
        let mut sorted = pillars.to_vec();
        sorted.sort_by(|a, b| a.tenor.total_cmp(&b.tenor));
        let unusable = |p: &&CurvePillar| {
            !p.tenor.is_finite() || p.tenor < 0.0 || !p.rate.is_finite()
        };
        if let Some(bad) = sorted.iter().find(unusable) {
            return Err(CurveError::invalid_pillars(format!(
                "pillar ({}, {}) is not usable",
                bad.tenor, bad.rate
            )));
        }

        let xs = sorted.iter().map(|p| p.tenor).collect();
        let ys = sorted.iter().map(|p| p.rate).collect();
        let interpolator = LinearInterpolator::new(xs, ys)?.with_flat_extrapolation();

        Ok(Self {
            pillars: sorted,
            interpolator,
        })
    }

    /// Decodes a JSON array of `{ "tenor": .., "rate": .. }` objects.
    pub fn from_json_str(json: &str) -> CurveResult<Self> {
        let pillars: Vec<CurvePillar> = serde_json::from_str(json)?;
        Self::from_pillars(&pillars)
    }

    /// The pillars, sorted by tenor.
    #[must_use]
    pub fn pillars(&self) -> &[CurvePillar] {
        &self.pillars
    }
}

impl BenchmarkCurve for ZeroCurve {
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        check_tenor(t)?;
        Ok(self.interpolator.interpolate(t)?)
    }

    fn name(&self) -> &str {
        "zero"
    }
}
