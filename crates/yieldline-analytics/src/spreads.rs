//! Z-spread over a benchmark curve, and the vanilla OAS approximation.
//!
//! The Z-spread `s` solves
//!
//! ```text
//! Dirty Price = Σ CF_i × DF(t_i) × exp(-s × t_i)
//! ```
//!
//! where `DF` comes from the benchmark curve shifted in parallel by `s`.

use serde::{Deserialize, Serialize};
use yieldline_curves::curves::ShiftedCurve;
use yieldline_curves::BenchmarkCurve;
use yieldline_math::solvers::{bounded_newton, SolverConfig};

use crate::cashflows::CashFlowProjection;
use crate::error::{AnalyticsResult, CalculationError};
use crate::risk::RiskMetrics;
use crate::yields::non_convergent;

/// Z-spread search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZSpreadConfig {
    /// Convergence threshold on the price residual.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Lower clamp in basis points.
    pub min_spread_bps: f64,
    /// Upper clamp in basis points.
    pub max_spread_bps: f64,
}

impl Default for ZSpreadConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 100,
            min_spread_bps: -500.0,
            max_spread_bps: 1000.0,
        }
    }
}

/// Z-spread calculator over one benchmark curve.
pub struct ZSpreadCalculator<'a> {
    curve: &'a dyn BenchmarkCurve,
    config: ZSpreadConfig,
}

impl std::fmt::Debug for ZSpreadCalculator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZSpreadCalculator")
            .field("curve", &self.curve.name())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> ZSpreadCalculator<'a> {
    /// Creates a calculator with default settings.
    #[must_use]
    pub fn new(curve: &'a dyn BenchmarkCurve) -> Self {
        Self {
            curve,
            config: ZSpreadConfig::default(),
        }
    }

    /// Replaces the search settings.
    #[must_use]
    pub fn with_config(mut self, config: ZSpreadConfig) -> Self {
        self.config = config;
        self
    }

    /// Price of `flows` off the curve shifted by `spread` (decimal).
    pub fn price_at(&self, flows: &CashFlowProjection, spread: f64) -> AnalyticsResult<f64> {
        let shifted = ShiftedCurve::new(self.curve, spread);
        flows
            .flows()
            .iter()
            .try_fold(0.0, |pv, cf| -> AnalyticsResult<f64> {
                Ok(pv + cf.amount * shifted.discount_factor(cf.time)?)
            })
    }

    /// Solves for the Z-spread matching `dirty_price`, in basis points.
    pub fn calculate(&self, flows: &CashFlowProjection, dirty_price: f64) -> AnalyticsResult<f64> {
        if !dirty_price.is_finite() || dirty_price <= 0.0 {
            return Err(CalculationError::NonPositivePrice { price: dirty_price }.into());
        }

        // Base discount factors are fixed across iterations; curve failures
        // surface here rather than inside the search.
        let base: Vec<(f64, f64)> = flows
            .flows()
            .iter()
            .map(|cf| -> AnalyticsResult<(f64, f64)> {
                Ok((cf.time, cf.amount * self.curve.discount_factor(cf.time)?))
            })
            .collect::<AnalyticsResult<_>>()?;

        let objective = |s: f64| {
            base.iter()
                .map(|(t, pv)| pv * (-s * t).exp())
                .sum::<f64>()
                - dirty_price
        };
        let derivative = |s: f64| {
            -base
                .iter()
                .map(|(t, pv)| t * pv * (-s * t).exp())
                .sum::<f64>()
        };

        let bounds = (
            self.config.min_spread_bps / 10_000.0,
            self.config.max_spread_bps / 10_000.0,
        );
        let config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);
        let result = bounded_newton(objective, derivative, 0.0, bounds, &config)
            .map_err(|err| non_convergent("z-spread", &err, self.config.max_iterations, 0.0))?;

        let bps = result.root * 10_000.0;
        log::debug!(
            "z-spread {bps:.2} bp over {} in {} iterations",
            self.curve.name(),
            result.iterations
        );
        Ok(bps)
    }
}

/// Option-adjusted measures for a bond without embedded options.
///
/// With no option to value the OAS collapses to the Z-spread and the
/// option-adjusted duration and convexity to their modified counterparts.
/// Callable and putable bonds are not detected and get the same treatment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OasApproximation {
    /// Option-adjusted spread in basis points.
    pub oas: f64,
    /// Option-adjusted duration.
    pub option_adjusted_duration: f64,
    /// Option-adjusted convexity.
    pub option_adjusted_convexity: f64,
}

impl OasApproximation {
    /// Builds the vanilla approximation from a Z-spread and risk metrics.
    #[must_use]
    pub fn vanilla(z_spread_bps: f64, metrics: &RiskMetrics) -> Self {
        Self {
            oas: z_spread_bps,
            option_adjusted_duration: metrics.modified_duration,
            option_adjusted_convexity: metrics.convexity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalyticsError, SolverError};
    use crate::yields::dirty_price;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use yieldline_bonds::prelude::*;
    use yieldline_core::Date;
    use yieldline_curves::curves::{CurvePillar, FlatCurve, ZeroCurve};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flows() -> CashFlowProjection {
        let bond = BondDefinition::new(
            "B",
            dec!(0.05),
            date(2035, 3, 1),
            BondCategory::Corporate.bundle(),
        );
        let settlement = date(2025, 7, 10);
        let schedule = Schedule::generate(&bond, settlement).unwrap();
        CashFlowProjection::project(&bond, &schedule, settlement).unwrap()
    }

    #[test]
    fn test_zero_spread_at_equivalent_flat_curve() {
        let cf = flows();
        let ytm = 0.055;
        let continuous = 2.0 * (1.0 + ytm / 2.0_f64).ln();
        let curve = FlatCurve::new(continuous);

        let z = ZSpreadCalculator::new(&curve)
            .calculate(&cf, dirty_price(&cf, ytm))
            .unwrap();
        assert_relative_eq!(z, 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_spread_recovers_shift() {
        let cf = flows();
        let curve = ZeroCurve::from_pillars(&[
            CurvePillar { tenor: 1.0, rate: 0.040 },
            CurvePillar { tenor: 5.0, rate: 0.042 },
            CurvePillar { tenor: 10.0, rate: 0.045 },
        ])
        .unwrap();
        let calc = ZSpreadCalculator::new(&curve);
        let target = calc.price_at(&cf, 0.0125).unwrap();

        let z = calc.calculate(&cf, target).unwrap();
        assert_relative_eq!(z, 125.0, epsilon = 0.01);
    }

    #[test]
    fn test_spread_beyond_clamp_is_non_convergent() {
        let cf = flows();
        let curve = FlatCurve::new(0.04);
        let err = ZSpreadCalculator::new(&curve).calculate(&cf, 5.0).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::Solver(SolverError::NonConvergent { target: "z-spread", .. })
        ));
    }

    #[test]
    fn test_oas_equals_z_spread_for_vanilla() {
        let cf = flows();
        let metrics = RiskMetrics::compute(&cf, 0.05).unwrap();
        let oas = OasApproximation::vanilla(87.5, &metrics);
        assert_relative_eq!(oas.oas, 87.5);
        assert_relative_eq!(oas.option_adjusted_duration, metrics.modified_duration);
        assert_relative_eq!(oas.option_adjusted_convexity, metrics.convexity);
    }
}
