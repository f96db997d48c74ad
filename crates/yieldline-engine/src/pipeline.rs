//! The per-bond pipeline: resolve, schedule, solve, measure.
//!
//! A pure function of the position and the [`EngineContext`]; it never
//! touches shared mutable state, so any number of positions can run it in
//! parallel against one context.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use yieldline_analytics::cashflows::CashFlowProjection;
use yieldline_analytics::risk::{self, RiskMetrics};
use yieldline_analytics::spreads::{OasApproximation, ZSpreadCalculator};
use yieldline_analytics::{AnalyticsError, SolverError};
use yieldline_bonds::conventions::{Confidence, ConventionSource};
use yieldline_bonds::identifiers::Identifier;
use yieldline_bonds::schedule::Schedule;
use yieldline_bonds::types::{BondTerms, SettlementContext};
use yieldline_core::Date;

use crate::context::EngineContext;
use crate::error::PositionError;

/// One bond to analyze: who it is, its clean price, and optionally its
/// portfolio weight and economic terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPosition {
    /// Whatever identifies the bond.
    pub identifier: Identifier,
    /// Clean price per 100 face.
    pub price: Option<f64>,
    /// Portfolio weight in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Coupon and maturity, when known to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<BondTerms>,
}

impl PortfolioPosition {
    /// Creates a position at a clean price.
    #[must_use]
    pub fn new(identifier: Identifier, price: f64) -> Self {
        Self {
            identifier,
            price: Some(price),
            weight: None,
            terms: None,
        }
    }

    /// Sets the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Supplies coupon and maturity.
    #[must_use]
    pub fn with_terms(mut self, terms: BondTerms) -> Self {
        self.terms = Some(terms);
        self
    }

    /// Weight, rejecting negative and non-finite values.
    pub fn checked_weight(&self) -> Result<Option<f64>, PositionError> {
        match self.weight {
            Some(w) if !w.is_finite() || w < 0.0 => Err(PositionError::invalid_input(format!(
                "{}: weight must be non-negative, got {w}",
                self.identifier.key()
            ))),
            weight => Ok(weight),
        }
    }

    /// Clean price, rejecting missing and non-positive values.
    pub fn clean_price(&self) -> Result<f64, PositionError> {
        match self.price {
            None => Err(PositionError::invalid_input(format!(
                "{}: missing price",
                self.identifier.key()
            ))),
            Some(p) if !p.is_finite() || p <= 0.0 => Err(PositionError::invalid_input(format!(
                "{}: price must be positive, got {p}",
                self.identifier.key()
            ))),
            Some(p) => Ok(p),
        }
    }
}

/// Analytics of one bond.
///
/// Yields and rates are decimals, spreads are in basis points, prices are
/// per 100 face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    /// Identifier key of the bond.
    pub identifier: String,
    /// Yield to maturity.
    pub ytm: f64,
    /// Modified duration.
    pub duration: f64,
    /// Macaulay duration.
    pub macaulay_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// Accrued interest.
    pub accrued_interest: f64,
    /// Clean price.
    pub clean_price: f64,
    /// Clean price plus accrued.
    pub dirty_price: f64,
    /// Price value of one basis point.
    pub pvbp: f64,
    /// Z-spread over the benchmark curve, when one is configured.
    pub spread: Option<f64>,
    /// Vanilla option-adjusted measures, when a spread was computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oas: Option<OasApproximation>,
    /// Settlement date.
    pub settlement_date: Date,
    /// Maturity date.
    pub maturity: Date,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Convention confidence from the resolver.
    pub confidence: Confidence,
    /// Resolution tier that produced the conventions.
    pub source: ConventionSource,
    /// False when the yield search did not converge.
    pub converged: bool,
    /// True when a fallback value stands in for a computed one.
    pub degraded: bool,
}

/// Runs the full pipeline for one position.
pub fn analyze_position(
    ctx: &EngineContext,
    position: &PortfolioPosition,
) -> Result<AnalyticsResult, PositionError> {
    let price = position.clean_price()?;
    let config = ctx.config();

    let resolved =
        ctx.resolver()
            .resolve_bond(&position.identifier, price, position.terms.as_ref())?;
    let bond = &resolved.definition;
    let record = &resolved.record;

    let settlement = SettlementContext::for_bond(ctx.trade_date(), bond).settlement_date;
    let schedule = Schedule::generate(bond, settlement)?;
    let flows = CashFlowProjection::project(bond, &schedule, settlement)?;
    let coupon_rate = bond.coupon_rate.to_f64().unwrap_or(0.0);

    let mut degraded = false;
    let (ytm, converged) = match config.yield_solver().solve(&flows, price) {
        Ok(solution) => (solution.ytm, true),
        Err(AnalyticsError::Solver(SolverError::NonConvergent { iterations, last, .. }))
            if config.fallback_to_coupon =>
        {
            warn!(
                bond = %bond.id,
                iterations,
                last,
                coupon_rate,
                "yield search did not converge, using coupon rate"
            );
            degraded = true;
            (coupon_rate, false)
        }
        Err(err) => return Err(err.into()),
    };

    let metrics = RiskMetrics::compute(&flows, ytm)?;
    let accrued = flows.accrued_f64();
    let dirty = price + accrued;

    let mut spread = None;
    let mut oas = None;
    if let Some(curve) = ctx.curve() {
        match ZSpreadCalculator::new(curve)
            .with_config(config.spread)
            .calculate(&flows, dirty)
        {
            Ok(z) => {
                spread = Some(z);
                oas = Some(OasApproximation::vanilla(z, &metrics));
            }
            Err(err) => {
                warn!(bond = %bond.id, curve = curve.name(), error = %err, "no z-spread");
                degraded = true;
            }
        }
    }

    debug!(
        bond = %bond.id,
        source = %record.source,
        ytm,
        duration = metrics.modified_duration,
        "position analyzed"
    );

    Ok(AnalyticsResult {
        identifier: bond.id.clone(),
        ytm,
        duration: metrics.modified_duration,
        macaulay_duration: metrics.macaulay_duration,
        convexity: metrics.convexity,
        accrued_interest: accrued,
        clean_price: price,
        dirty_price: dirty,
        pvbp: risk::pvbp(metrics.modified_duration, dirty),
        spread,
        oas,
        settlement_date: settlement,
        maturity: bond.maturity,
        coupon_rate,
        confidence: record.confidence,
        source: record.source,
        converged,
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use yieldline_analytics::yields::YieldSolverConfig;
    use yieldline_curves::curves::FlatCurve;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ctx() -> EngineContext {
        EngineContext::new(EngineConfig::default().with_as_of(date(2025, 6, 27)))
    }

    #[test]
    fn test_treasury_from_description() {
        let position = PortfolioPosition::new(Identifier::from_description("T 3 15/08/52"), 71.66);
        let result = analyze_position(&ctx(), &position).unwrap();

        assert_eq!(result.settlement_date, date(2025, 6, 30));
        assert_eq!(result.source, ConventionSource::ParsedDescription);
        assert!(result.converged && !result.degraded);
        assert_relative_eq!(result.ytm, 0.048985, epsilon = 5e-5);
        assert!((result.duration - 16.358).abs() <= 0.02);
        assert_relative_eq!(result.dirty_price, result.clean_price + result.accrued_interest);
        assert!(result.spread.is_none());
    }

    #[test]
    fn test_spread_with_curve() {
        let ctx = ctx().with_curve(Arc::new(FlatCurve::new(0.045)));
        let position = PortfolioPosition::new(Identifier::from_description("T 3 15/08/52"), 71.66);
        let result = analyze_position(&ctx, &position).unwrap();
        let spread = result.spread.unwrap();
        assert!(spread > 25.0 && spread < 45.0);
        assert_relative_eq!(result.oas.unwrap().oas, spread);
    }

    #[test]
    fn test_missing_price_is_invalid_input() {
        let position = PortfolioPosition {
            identifier: Identifier::from_description("T 3 15/08/52"),
            ..PortfolioPosition::default()
        };
        let err = analyze_position(&ctx(), &position).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.is_request_fatal());
    }

    #[test]
    fn test_weight_must_be_non_negative() {
        let position = PortfolioPosition::new(Identifier::from_description("T 3 15/08/52"), 71.66);
        assert_eq!(position.checked_weight().unwrap(), None);
        assert_eq!(position.clone().with_weight(0.0).checked_weight().unwrap(), Some(0.0));

        for bad in [-50.0, f64::NAN, f64::INFINITY] {
            let err = position.clone().with_weight(bad).checked_weight().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_matured_bond_is_invalid_date() {
        let position = PortfolioPosition::new(Identifier::from_isin("XS1234567896"), 99.0)
            .with_terms(BondTerms::new(dec!(0.04), date(2024, 3, 1)));
        let err = analyze_position(&ctx(), &position).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
    }

    #[test]
    fn test_coupon_fallback_is_flagged() {
        let config = EngineConfig::default()
            .with_as_of(date(2025, 6, 27))
            .with_solver(YieldSolverConfig::default().with_max_iterations(1).with_tolerance(1e-12));
        let position = PortfolioPosition::new(Identifier::from_description("T 3 15/08/52"), 71.66);

        let result = analyze_position(&EngineContext::new(config.clone()), &position).unwrap();
        assert!(result.degraded);
        assert!(!result.converged);
        assert_relative_eq!(result.ytm, 0.03);

        let strict = config.with_fallback_to_coupon(false);
        let err = analyze_position(&EngineContext::new(strict), &position).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonConvergent);
    }
}
