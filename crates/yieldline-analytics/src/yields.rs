//! Yield to maturity.
//!
//! Prices discount each flow at `(1 + y/f)^-(w + i)`; the solver runs a
//! range-clamped Newton-Raphson on the clean price with the analytic
//! derivative.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use yieldline_analytics::prelude::*;
//! use yieldline_bonds::prelude::*;
//! use yieldline_core::Date;
//!
//! let bond = BondDefinition::new(
//!     "UST",
//!     dec!(0.03),
//!     Date::from_ymd(2052, 8, 15).unwrap(),
//!     BondCategory::Treasury.bundle(),
//! );
//! let settlement = Date::from_ymd(2025, 6, 30).unwrap();
//! let schedule = Schedule::generate(&bond, settlement).unwrap();
//! let flows = CashFlowProjection::project(&bond, &schedule, settlement).unwrap();
//!
//! let solution = YieldSolver::default().solve(&flows, 71.66).unwrap();
//! assert!((solution.ytm - 0.049).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use yieldline_math::solvers::{bounded_newton, SolverConfig};
use yieldline_math::MathError;

use crate::cashflows::CashFlowProjection;
use crate::error::{AnalyticsResult, CalculationError, SolverError};

/// Yield search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverConfig {
    /// Convergence threshold on the price residual, in price units.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Lower clamp on the iterate.
    pub min_yield: f64,
    /// Upper clamp on the iterate.
    pub max_yield: f64,
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 100,
            min_yield: -0.05,
            max_yield: 0.50,
        }
    }
}

impl YieldSolverConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the clamp range.
    #[must_use]
    pub fn with_bounds(mut self, min_yield: f64, max_yield: f64) -> Self {
        self.min_yield = min_yield;
        self.max_yield = max_yield;
        self
    }
}

/// Result of a yield search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolution {
    /// Yield to maturity (decimal).
    pub ytm: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Clean-price residual at `ytm`.
    pub residual: f64,
}

/// Clean, dirty and accrued at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Dirty price less accrued.
    pub clean: f64,
    /// Present value of the remaining flows.
    pub dirty: f64,
    /// Accrued interest.
    pub accrued: f64,
}

/// Present value of the remaining flows at `ytm`.
#[must_use]
pub fn dirty_price(flows: &CashFlowProjection, ytm: f64) -> f64 {
    let base = 1.0 + ytm / flows.periods_per_year();
    flows
        .flows()
        .iter()
        .map(|cf| cf.amount * base.powf(-cf.periods))
        .sum()
}

/// First derivative of the dirty (and clean) price with respect to yield.
#[must_use]
pub fn price_derivative(flows: &CashFlowProjection, ytm: f64) -> f64 {
    let f = flows.periods_per_year();
    let base = 1.0 + ytm / f;
    -flows
        .flows()
        .iter()
        .map(|cf| cf.amount * cf.periods / f * base.powf(-cf.periods - 1.0))
        .sum::<f64>()
}

/// Prices the flows at `ytm`.
#[must_use]
pub fn price_from_yield(flows: &CashFlowProjection, ytm: f64) -> PriceBreakdown {
    let dirty = dirty_price(flows, ytm);
    let accrued = flows.accrued_f64();
    PriceBreakdown {
        clean: dirty - accrued,
        dirty,
        accrued,
    }
}

/// Newton-Raphson yield solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldSolver {
    config: YieldSolverConfig,
    allow_negative: bool,
}

impl YieldSolver {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: YieldSolverConfig) -> Self {
        Self {
            config,
            allow_negative: false,
        }
    }

    /// Accepts a negative solved yield instead of reporting
    /// [`SolverError::NegativeYield`].
    #[must_use]
    pub fn with_allow_negative(mut self, allow_negative: bool) -> Self {
        self.allow_negative = allow_negative;
        self
    }

    /// Solver settings.
    #[must_use]
    pub fn config(&self) -> &YieldSolverConfig {
        &self.config
    }

    /// Solves for the yield that reprices `flows` to `clean_price`.
    ///
    /// The search starts at the current yield `coupon / clean_price`.
    pub fn solve(
        &self,
        flows: &CashFlowProjection,
        clean_price: f64,
    ) -> AnalyticsResult<YieldSolution> {
        if !clean_price.is_finite() || clean_price <= 0.0 {
            return Err(CalculationError::NonPositivePrice { price: clean_price }.into());
        }

        let accrued = flows.accrued_f64();
        let f = flows.periods_per_year();
        let guess = flows.coupon() * f / clean_price;

        let objective = |y: f64| dirty_price(flows, y) - accrued - clean_price;
        let derivative = |y: f64| price_derivative(flows, y);
        let config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        let result = bounded_newton(
            objective,
            derivative,
            guess,
            (self.config.min_yield, self.config.max_yield),
            &config,
        )
        .map_err(|err| non_convergent("yield", &err, self.config.max_iterations, guess))?;

        if result.root < 0.0 && !self.allow_negative {
            return Err(SolverError::NegativeYield { ytm: result.root }.into());
        }

        log::debug!(
            "yield {:.6} in {} iterations (residual {:.2e})",
            result.root,
            result.iterations,
            result.residual
        );
        Ok(YieldSolution {
            ytm: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}

/// Maps a root-finder failure to [`SolverError::NonConvergent`].
pub(crate) fn non_convergent(
    target: &'static str,
    err: &MathError,
    max_iterations: u32,
    fallback: f64,
) -> SolverError {
    match *err {
        MathError::ConvergenceFailed {
            iterations, last, ..
        } => SolverError::non_convergent(target, iterations, last),
        _ => SolverError::non_convergent(target, max_iterations, fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use yieldline_bonds::prelude::*;
    use yieldline_core::Date;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn project(coupon: rust_decimal::Decimal, maturity: Date, settlement: Date) -> CashFlowProjection {
        let bond = BondDefinition::new("B", coupon, maturity, BondCategory::Corporate.bundle());
        let schedule = Schedule::generate(&bond, settlement).unwrap();
        CashFlowProjection::project(&bond, &schedule, settlement).unwrap()
    }

    #[test]
    fn test_par_bond_on_coupon_date() {
        let flows = project(dec!(0.05), date(2030, 6, 15), date(2025, 6, 15));
        assert_relative_eq!(dirty_price(&flows, 0.05), 100.0, epsilon = 1e-9);

        let solution = YieldSolver::default().solve(&flows, 100.0).unwrap();
        assert_relative_eq!(solution.ytm, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let flows = project(dec!(0.045), date(2034, 3, 1), date(2025, 7, 10));
        let h = 1e-6;
        let fd = (dirty_price(&flows, 0.05 + h) - dirty_price(&flows, 0.05 - h)) / (2.0 * h);
        assert_relative_eq!(price_derivative(&flows, 0.05), fd, max_relative = 1e-6);
    }

    #[test]
    fn test_clean_is_dirty_less_accrued() {
        let flows = project(dec!(0.06), date(2031, 9, 30), date(2025, 7, 15));
        let p = price_from_yield(&flows, 0.055);
        assert!(p.accrued > 0.0);
        assert_relative_eq!(p.clean + p.accrued, p.dirty);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let flows = project(dec!(0.05), date(2030, 6, 15), date(2025, 6, 15));
        assert!(matches!(
            YieldSolver::default().solve(&flows, 0.0),
            Err(AnalyticsError::Calculation(CalculationError::NonPositivePrice { .. }))
        ));
    }

    #[test]
    fn test_negative_yield_surfaced() {
        let flows = project(dec!(0.01), date(2027, 6, 15), date(2025, 6, 15));
        let solver = YieldSolver::default();
        assert!(matches!(
            solver.solve(&flows, 104.0),
            Err(AnalyticsError::Solver(SolverError::NegativeYield { .. }))
        ));

        let lenient = YieldSolver::default().with_allow_negative(true);
        assert!(lenient.solve(&flows, 104.0).unwrap().ytm < 0.0);
    }

    #[test]
    fn test_price_beyond_clamp_is_non_convergent() {
        let flows = project(dec!(0.05), date(2035, 6, 15), date(2025, 6, 15));
        let err = YieldSolver::default().solve(&flows, 1_000.0).unwrap_err();
        match err {
            AnalyticsError::Solver(SolverError::NonConvergent { iterations, last, .. }) => {
                assert_eq!(iterations, 100);
                assert!(last.is_finite());
                assert_relative_eq!(last, -0.05);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
