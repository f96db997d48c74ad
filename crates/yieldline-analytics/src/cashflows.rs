//! Cash flow projection under the street convention.
//!
//! With `w = days(settlement, next) / days(last, next)` the *i*-th remaining
//! cash flow (0-based) sits `w + i` coupon periods, or `(w + i) / f` years,
//! from settlement. Amounts are scaled to 100 face so prices from every
//! function in this crate are quoted per 100.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yieldline_bonds::accrued::AccruedInterestCalculator;
use yieldline_bonds::schedule::{CouponPair, Schedule};
use yieldline_bonds::types::BondDefinition;
use yieldline_core::{Date, Frequency};

use crate::error::{AnalyticsResult, CalculationError};

/// One remaining cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Unadjusted coupon date.
    pub date: Date,
    /// Business-day adjusted payment date.
    pub payment_date: Date,
    /// Amount per 100 face (coupon, plus redemption on the last flow).
    pub amount: f64,
    /// Coupon periods from settlement, `w + i`.
    pub periods: f64,
    /// Years from settlement, `periods / frequency`.
    pub time: f64,
}

/// Remaining cash flows of a bond as seen from one settlement date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    settlement: Date,
    frequency: Frequency,
    coupon_pair: CouponPair,
    coupon: f64,
    accrued: Decimal,
    flows: Vec<CashFlow>,
}

impl CashFlowProjection {
    /// Projects the flows of `bond` remaining after `settlement`.
    pub fn project(
        bond: &BondDefinition,
        schedule: &Schedule,
        settlement: Date,
    ) -> AnalyticsResult<Self> {
        bond.check_settlement(settlement)?;

        let pair = schedule
            .coupon_pair(settlement)
            .ok_or(CalculationError::NoFutureCashFlows)?;

        if bond.face_value <= Decimal::ZERO {
            return Err(CalculationError::domain(format!(
                "face value {} must be positive",
                bond.face_value
            ))
            .into());
        }
        let scale = Decimal::ONE_HUNDRED / bond.face_value;
        let fraction =
            AccruedInterestCalculator::accrual_fraction(settlement, pair, bond.day_count)?;
        let coupon = bond.coupon_per_period() * scale;
        let accrued = coupon * fraction;

        let w = to_f64(Decimal::ONE - fraction, "period fraction")?;
        let coupon = to_f64(coupon, "coupon")?;
        let redemption = to_f64(bond.face_value * scale, "redemption")?;
        let f = f64::from(bond.frequency.periods_per_year());

        let dates = schedule.dates();
        let adjusted = schedule.adjusted_dates();
        let first = dates.partition_point(|d| *d <= settlement);
        let last_index = dates.len() - 1;

        let flows: Vec<CashFlow> = (first..dates.len())
            .enumerate()
            .map(|(i, idx)| {
                let periods = w + i as f64;
                let amount = if idx == last_index {
                    coupon + redemption
                } else {
                    coupon
                };
                CashFlow {
                    date: dates[idx],
                    payment_date: adjusted[idx],
                    amount,
                    periods,
                    time: periods / f,
                }
            })
            .collect();

        if flows.is_empty() {
            return Err(CalculationError::NoFutureCashFlows.into());
        }

        Ok(Self {
            settlement,
            frequency: bond.frequency,
            coupon_pair: pair,
            coupon,
            accrued,
            flows,
        })
    }

    /// Settlement date the projection is anchored at.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compounding periods per year as a float.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.frequency.periods_per_year())
    }

    /// Coupon dates bracketing settlement.
    #[must_use]
    pub fn coupon_pair(&self) -> CouponPair {
        self.coupon_pair
    }

    /// Coupon per period per 100 face.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Accrued interest per 100 face.
    #[must_use]
    pub fn accrued(&self) -> Decimal {
        self.accrued
    }

    /// Accrued interest per 100 face as a float.
    #[must_use]
    pub fn accrued_f64(&self) -> f64 {
        self.accrued.to_f64().unwrap_or(0.0)
    }

    /// Remaining flows in date order.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Fraction of a period to the next coupon, `w`.
    #[must_use]
    pub fn period_fraction(&self) -> f64 {
        self.flows[0].periods
    }
}

fn to_f64(value: Decimal, what: &str) -> Result<f64, CalculationError> {
    value
        .to_f64()
        .ok_or_else(|| CalculationError::domain(format!("{what} {value} is not representable")))
}
