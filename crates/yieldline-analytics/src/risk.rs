//! Duration, convexity and PVBP.
//!
//! All measures are taken at the dirty price implied by the yield:
//!
//! ```text
//! Macaulay  = Σ t_i · PV_i / P
//! Modified  = Macaulay / (1 + y/f)
//! Convexity = Σ PV_i · n_i (n_i + 1) / (f² (1 + y/f)²) / P
//! PVBP      = Modified × P / 10 000
//! ```
//!
//! with `n_i = w + i` coupon periods and `t_i = n_i / f` years.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashFlowProjection;
use crate::error::{AnalyticsResult, CalculationError};
use crate::yields::dirty_price;

/// Default yield bump for finite-difference convexity (1 bp).
pub const CONVEXITY_BUMP: f64 = 0.0001;

/// Risk measures at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Cash-flow weighted average time in years.
    pub macaulay_duration: f64,
    /// Macaulay scaled by `1 / (1 + y/f)`.
    pub modified_duration: f64,
    /// Analytic convexity.
    pub convexity: f64,
    /// Price value of one basis point per 100 face.
    pub pvbp: f64,
    /// Dirty price the measures are taken at.
    pub dirty_price: f64,
}

impl RiskMetrics {
    /// Computes every measure at `ytm`.
    pub fn compute(flows: &CashFlowProjection, ytm: f64) -> AnalyticsResult<Self> {
        let price = positive_price(flows, ytm)?;
        let macaulay = macaulay_duration(flows, ytm)?;
        let modified = macaulay / discount_base(flows, ytm);
        Ok(Self {
            macaulay_duration: macaulay,
            modified_duration: modified,
            convexity: convexity(flows, ytm)?,
            pvbp: pvbp(modified, price),
            dirty_price: price,
        })
    }
}

fn discount_base(flows: &CashFlowProjection, ytm: f64) -> f64 {
    1.0 + ytm / flows.periods_per_year()
}

fn positive_price(flows: &CashFlowProjection, ytm: f64) -> Result<f64, CalculationError> {
    let price = dirty_price(flows, ytm);
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(CalculationError::NonPositivePrice { price })
    }
}

/// Macaulay duration in years.
pub fn macaulay_duration(flows: &CashFlowProjection, ytm: f64) -> AnalyticsResult<f64> {
    let base = discount_base(flows, ytm);
    let price = positive_price(flows, ytm)?;
    let weighted: f64 = flows
        .flows()
        .iter()
        .map(|cf| cf.time * cf.amount * base.powf(-cf.periods))
        .sum();
    Ok(weighted / price)
}

/// Modified duration in years.
pub fn modified_duration(flows: &CashFlowProjection, ytm: f64) -> AnalyticsResult<f64> {
    Ok(macaulay_duration(flows, ytm)? / discount_base(flows, ytm))
}

/// Analytic convexity from cash-flow weights.
pub fn convexity(flows: &CashFlowProjection, ytm: f64) -> AnalyticsResult<f64> {
    let f = flows.periods_per_year();
    let base = discount_base(flows, ytm);
    let price = positive_price(flows, ytm)?;
    let weighted: f64 = flows
        .flows()
        .iter()
        .map(|cf| cf.amount * cf.periods * (cf.periods + 1.0) * base.powf(-cf.periods - 2.0))
        .sum();
    Ok(weighted / (f * f * price))
}

/// Convexity from a symmetric price bump of `bump` in yield.
pub fn effective_convexity(flows: &CashFlowProjection, ytm: f64, bump: f64) -> AnalyticsResult<f64> {
    if !(bump.is_finite() && bump > 0.0) {
        return Err(CalculationError::domain(format!("bump must be positive, got {bump}")).into());
    }
    let price = positive_price(flows, ytm)?;
    let up = dirty_price(flows, ytm + bump);
    let down = dirty_price(flows, ytm - bump);
    Ok((up + down - 2.0 * price) / (price * bump * bump))
}

/// PVBP from modified duration and dirty price.
#[must_use]
pub fn pvbp(modified_duration: f64, dirty_price: f64) -> f64 {
    modified_duration * dirty_price / 10_000.0
}
