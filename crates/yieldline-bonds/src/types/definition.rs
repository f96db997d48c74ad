//! Canonical bond definition and settlement context.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use yieldline_core::calendars::{BusinessDayConvention, Calendar, CalendarRegion};
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Currency, Date, Frequency};

use super::category::ConventionBundle;
use crate::error::{InvalidDateError, ResolutionError};

/// Economic terms of a fixed-coupon bond plus the conventions needed to
/// value it.
///
/// Coupon rates are decimals (`0.03` is 3%). Face value defaults to 100.
///
/// ```rust
/// use rust_decimal_macros::dec;
/// use yieldline_bonds::prelude::*;
/// use yieldline_core::Date;
///
/// let bond = BondDefinition::new(
///     "US912810TL26",
///     dec!(0.03),
///     Date::from_ymd(2052, 8, 15).unwrap(),
///     BondCategory::Treasury.bundle(),
/// );
/// assert_eq!(bond.coupon_per_period(), dec!(1.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondDefinition {
    /// Resolution key (ISIN, ticker or description).
    pub id: String,
    /// Annual coupon rate, decimal.
    pub coupon_rate: Decimal,
    /// Final maturity.
    pub maturity: Date,
    /// Issue date, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    /// Day count basis for accrual and period fractions.
    pub day_count: DayCountConvention,
    /// Business day adjustment for payment dates.
    pub business_day: BusinessDayConvention,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Holiday calendar.
    pub calendar: CalendarRegion,
    /// Face value.
    pub face_value: Decimal,
    /// Currency.
    pub currency: Currency,
    /// Settlement lag in business days.
    pub settlement_days: u32,
}

impl BondDefinition {
    /// Creates a bond with face value 100 and the given conventions.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        coupon_rate: Decimal,
        maturity: Date,
        bundle: ConventionBundle,
    ) -> Self {
        Self {
            id: id.into(),
            coupon_rate,
            maturity,
            issue_date: None,
            day_count: bundle.day_count,
            business_day: bundle.business_day,
            frequency: bundle.frequency,
            calendar: bundle.calendar,
            face_value: dec!(100),
            currency: bundle.currency,
            settlement_days: bundle.settlement_days,
        }
    }

    /// Sets the issue date.
    #[must_use]
    pub fn with_issue_date(mut self, issue_date: Date) -> Self {
        self.issue_date = Some(issue_date);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_business_day(mut self, business_day: BusinessDayConvention) -> Self {
        self.business_day = business_day;
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarRegion) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn with_face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Coupon amount paid each period.
    #[must_use]
    pub fn coupon_per_period(&self) -> Decimal {
        self.coupon_rate * self.face_value / Decimal::from(self.frequency.periods_per_year())
    }

    /// Checks the settlement-independent invariants: coupon ≥ 0, face > 0,
    /// issue date (if any) before maturity.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        let invalid = |reason: String| ResolutionError::InvalidTerms {
            key: self.id.clone(),
            reason,
        };
        if self.coupon_rate.is_sign_negative() && !self.coupon_rate.is_zero() {
            return Err(invalid(format!("negative coupon {}", self.coupon_rate)));
        }
        if self.face_value <= Decimal::ZERO {
            return Err(invalid(format!("non-positive face value {}", self.face_value)));
        }
        if let Some(issue) = self.issue_date {
            if issue >= self.maturity {
                return Err(invalid(format!(
                    "issue date {issue} is not before maturity {}",
                    self.maturity
                )));
            }
        }
        Ok(())
    }

    /// Fails when the bond has matured by `settlement`.
    pub fn check_settlement(&self, settlement: Date) -> Result<(), InvalidDateError> {
        if self.maturity <= settlement {
            return Err(InvalidDateError::MaturityNotAfterSettlement {
                maturity: self.maturity,
                settlement,
            });
        }
        Ok(())
    }
}

/// Economic terms supplied by the caller or carried in reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Annual coupon rate, decimal.
    pub coupon_rate: Decimal,
    /// Final maturity.
    pub maturity: Date,
    /// Issue date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    /// Face value, 100 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_value: Option<Decimal>,
}

impl BondTerms {
    /// Terms with just a coupon and a maturity.
    #[must_use]
    pub fn new(coupon_rate: Decimal, maturity: Date) -> Self {
        Self {
            coupon_rate,
            maturity,
            issue_date: None,
            face_value: None,
        }
    }

    /// Sets the issue date.
    #[must_use]
    pub fn with_issue_date(mut self, issue_date: Date) -> Self {
        self.issue_date = Some(issue_date);
        self
    }
}

/// Dates that pin down one calculation.
///
/// Discounting runs from `evaluation_date`, which is the settlement date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementContext {
    /// Trade date.
    pub trade_date: Date,
    /// Trade date plus the settlement lag in business days.
    pub settlement_date: Date,
    /// Date all cash flows are discounted to.
    pub evaluation_date: Date,
}

impl SettlementContext {
    /// Settles `lag_days` business days after `trade_date`.
    #[must_use]
    pub fn from_trade_date(trade_date: Date, lag_days: u32, calendar: &dyn Calendar) -> Self {
        let lag = i32::try_from(lag_days).unwrap_or(i32::MAX);
        let settlement_date = calendar.add_business_days(trade_date, lag);
        Self {
            trade_date,
            settlement_date,
            evaluation_date: settlement_date,
        }
    }

    /// Uses the bond's own settlement lag and calendar.
    #[must_use]
    pub fn for_bond(trade_date: Date, bond: &BondDefinition) -> Self {
        Self::from_trade_date(trade_date, bond.settlement_days, bond.calendar.calendar())
    }

    /// A context whose trade, settlement and evaluation dates coincide.
    #[must_use]
    pub fn at_settlement(settlement_date: Date) -> Self {
        Self {
            trade_date: settlement_date,
            settlement_date,
            evaluation_date: settlement_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BondCategory;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn treasury() -> BondDefinition {
        BondDefinition::new(
            "US912810TL26",
            dec!(0.03),
            date(2052, 8, 15),
            BondCategory::Treasury.bundle(),
        )
    }

    #[test]
    fn test_defaults() {
        let bond = treasury();
        assert_eq!(bond.face_value, dec!(100));
        assert_eq!(bond.day_count, DayCountConvention::ActualActualBond);
        assert_eq!(bond.coupon_per_period(), dec!(1.5));
        assert!(bond.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_coupon() {
        let mut bond = treasury();
        bond.coupon_rate = dec!(-0.01);
        assert!(matches!(
            bond.validate(),
            Err(ResolutionError::InvalidTerms { .. })
        ));
        bond.coupon_rate = Decimal::ZERO;
        assert!(bond.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_issue_after_maturity() {
        let bond = treasury().with_issue_date(date(2053, 1, 1));
        assert!(bond.validate().is_err());
    }

    #[test]
    fn test_check_settlement() {
        let bond = treasury();
        assert!(bond.check_settlement(date(2025, 6, 30)).is_ok());
        assert!(matches!(
            bond.check_settlement(date(2052, 8, 15)),
            Err(InvalidDateError::MaturityNotAfterSettlement { .. })
        ));
    }

    #[test]
    fn test_settlement_context_skips_weekend() {
        // Friday 2025-06-27, T+1 lands on Monday.
        let ctx = SettlementContext::for_bond(date(2025, 6, 27), &treasury());
        assert_eq!(ctx.settlement_date, date(2025, 6, 30));
        assert_eq!(ctx.evaluation_date, ctx.settlement_date);
        assert_eq!(ctx.trade_date, date(2025, 6, 27));
    }

    #[test]
    fn test_settlement_context_skips_holiday() {
        // Thursday 2025-07-03, T+1 skips Independence Day.
        let ctx = SettlementContext::for_bond(date(2025, 7, 3), &treasury());
        assert_eq!(ctx.settlement_date, date(2025, 7, 7));
    }

    #[test]
    fn test_serde_roundtrip() {
        let bond = treasury();
        let json = serde_json::to_string(&bond).unwrap();
        assert!(json.contains("\"ActualActual_Bond\""));
        let back: BondDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bond);
    }
}
