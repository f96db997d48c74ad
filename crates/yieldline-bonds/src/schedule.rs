//! Coupon schedule generation.
//!
//! Schedules are rolled backward from maturity so every coupon date keeps
//! the maturity's day-of-month, whatever month settlement falls in.
//!
//! ```rust
//! use rust_decimal_macros::dec;
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
//! let pair = schedule.coupon_pair(settlement).unwrap();
//! assert_eq!(pair.last, Date::from_ymd(2025, 2, 15).unwrap());
//! assert_eq!(pair.next, Date::from_ymd(2025, 8, 15).unwrap());
//! ```

use serde::{Deserialize, Serialize};
use yieldline_core::{Date, Frequency};

use crate::error::InvalidDateError;
use crate::types::BondDefinition;

/// How far before settlement generation keeps rolling back.
pub const LOOKBACK_YEARS: i32 = 2;

/// Coupon dates bracketing a settlement date: `last <= settlement < next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponPair {
    /// Last coupon date on or before settlement.
    pub last: Date,
    /// First coupon date after settlement.
    pub next: Date,
}

/// Ordered coupon dates ending at maturity.
///
/// Unadjusted dates drive accrual and period fractions; adjusted dates are
/// the payment dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    unadjusted: Vec<Date>,
    adjusted: Vec<Date>,
    frequency: Frequency,
}

impl Schedule {
    /// Generates the schedule of `bond` around `settlement`.
    ///
    /// Rolls back one coupon period at a time from maturity, stopping after
    /// the first date more than two years before settlement, or after the
    /// first date on or before both the issue date and settlement. The
    /// result always brackets settlement.
    pub fn generate(bond: &BondDefinition, settlement: Date) -> Result<Self, InvalidDateError> {
        bond.check_settlement(settlement)?;

        let maturity = bond.maturity;
        let months = bond.frequency.months_per_period() as i32;
        let end_of_month = maturity.is_end_of_month();
        let horizon = settlement.add_years(-LOOKBACK_YEARS)?;

        let mut dates = vec![maturity];
        let mut k = 1;
        loop {
            let mut date = maturity.add_months(-k * months)?;
            if end_of_month {
                date = date.end_of_month();
            }
            dates.push(date);

            let before_horizon = date < horizon;
            let covers_issue = bond
                .issue_date
                .is_some_and(|issue| date <= issue && date <= settlement);
            if before_horizon || covers_issue {
                break;
            }
            k += 1;
        }
        dates.reverse();

        let calendar = bond.calendar.calendar();
        let adjusted = dates
            .iter()
            .map(|d| calendar.adjust(*d, bond.business_day))
            .collect();

        Ok(Self {
            unadjusted: dates,
            adjusted,
            frequency: bond.frequency,
        })
    }

    /// Unadjusted coupon dates, strictly increasing, last is maturity.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.unadjusted
    }

    /// Business-day adjusted payment dates, aligned with [`Self::dates`].
    #[must_use]
    pub fn adjusted_dates(&self) -> &[Date] {
        &self.adjusted
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unadjusted.len()
    }

    /// True for an empty schedule (never produced by [`Self::generate`]).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unadjusted.is_empty()
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Option<Date> {
        self.unadjusted.last().copied()
    }

    /// Finds `last <= settlement < next` by linear scan.
    #[must_use]
    pub fn coupon_pair(&self, settlement: Date) -> Option<CouponPair> {
        self.unadjusted
            .windows(2)
            .find(|w| w[0] <= settlement && settlement < w[1])
            .map(|w| CouponPair {
                last: w[0],
                next: w[1],
            })
    }

    /// Unadjusted coupon dates strictly after settlement.
    #[must_use]
    pub fn remaining_dates(&self, settlement: Date) -> &[Date] {
        let first = self.unadjusted.partition_point(|d| *d <= settlement);
        &self.unadjusted[first..]
    }

    /// Consecutive `(start, end)` periods.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.unadjusted.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BondCategory;
    use rust_decimal_macros::dec;
    use yieldline_core::calendars::BusinessDayConvention;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn bond(maturity: Date, category: BondCategory) -> BondDefinition {
        BondDefinition::new("TEST", dec!(0.05), maturity, category.bundle())
    }

    #[test]
    fn test_backward_from_maturity() {
        let b = bond(date(2052, 8, 15), BondCategory::Treasury);
        let settlement = date(2025, 6, 30);
        let schedule = Schedule::generate(&b, settlement).unwrap();

        assert_eq!(schedule.maturity(), Some(date(2052, 8, 15)));
        assert!(schedule.dates().iter().all(|d| d.day() == 15));
        assert!(schedule.dates()[0] < date(2023, 6, 30));
        assert_eq!(schedule.dates()[0], date(2023, 2, 15));
        assert_eq!(schedule.remaining_dates(settlement).len(), 55);
    }

    #[test]
    fn test_month_misaligned_with_settlement() {
        // Coupons in March/September, settlement in June.
        let b = bond(date(2030, 3, 20), BondCategory::Corporate);
        let pair = Schedule::generate(&b, date(2025, 6, 10))
            .unwrap()
            .coupon_pair(date(2025, 6, 10))
            .unwrap();
        assert_eq!(pair.last, date(2025, 3, 20));
        assert_eq!(pair.next, date(2025, 9, 20));
    }

    #[test]
    fn test_end_of_month_maturity() {
        let b = bond(date(2030, 2, 28), BondCategory::Corporate);
        let schedule = Schedule::generate(&b, date(2025, 1, 15)).unwrap();
        let pair = schedule.coupon_pair(date(2025, 1, 15)).unwrap();
        assert_eq!(pair.last, date(2024, 8, 31));
        assert_eq!(pair.next, date(2025, 2, 28));
    }

    #[test]
    fn test_near_maturity_still_bracketed() {
        let b = bond(date(2025, 8, 15), BondCategory::Treasury);
        let schedule = Schedule::generate(&b, date(2025, 8, 14)).unwrap();
        assert!(schedule.len() >= 2);
        let pair = schedule.coupon_pair(date(2025, 8, 14)).unwrap();
        assert_eq!(pair.next, date(2025, 8, 15));
        assert_eq!(pair.last, date(2025, 2, 15));
    }

    #[test]
    fn test_issue_date_truncates() {
        let b = bond(date(2030, 6, 1), BondCategory::Corporate).with_issue_date(date(2025, 4, 1));
        let schedule = Schedule::generate(&b, date(2025, 6, 10)).unwrap();
        assert_eq!(schedule.dates()[0], date(2024, 12, 1));
        assert_eq!(schedule.dates()[1], date(2025, 6, 1));
    }

    #[test]
    fn test_settlement_on_coupon_date() {
        let b = bond(date(2030, 6, 1), BondCategory::Corporate);
        let pair = Schedule::generate(&b, date(2025, 6, 1))
            .unwrap()
            .coupon_pair(date(2025, 6, 1))
            .unwrap();
        assert_eq!(pair.last, date(2025, 6, 1));
    }

    #[test]
    fn test_adjusted_dates() {
        // 2025-11-15 is a Saturday.
        let b = bond(date(2030, 11, 15), BondCategory::Treasury)
            .with_business_day(BusinessDayConvention::Following);
        let schedule = Schedule::generate(&b, date(2025, 6, 30)).unwrap();
        let i = schedule
            .dates()
            .iter()
            .position(|d| *d == date(2025, 11, 15))
            .unwrap();
        assert_eq!(schedule.adjusted_dates()[i], date(2025, 11, 17));
    }

    #[test]
    fn test_matured_bond_rejected() {
        let b = bond(date(2024, 1, 1), BondCategory::Corporate);
        assert!(matches!(
            Schedule::generate(&b, date(2025, 6, 30)),
            Err(InvalidDateError::MaturityNotAfterSettlement { .. })
        ));
    }
}
