//! Day counts and accrued interest.
//!
//! Accrued interest is
//! `(coupon_rate / frequency) * face * days(last, settle) / days(last, next)`
//! with days counted under the bond's convention, and always stays below
//! one full coupon.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use yieldline_bonds::accrued::AccruedInterestCalculator;
//! use yieldline_bonds::schedule::CouponPair;
//! use yieldline_core::daycounts::DayCountConvention;
//! use yieldline_core::{Date, Frequency};
//!
//! let pair = CouponPair {
//!     last: Date::from_ymd(2025, 1, 15).unwrap(),
//!     next: Date::from_ymd(2025, 7, 15).unwrap(),
//! };
//! let accrued = AccruedInterestCalculator::standard(
//!     Date::from_ymd(2025, 4, 15).unwrap(),
//!     pair,
//!     dec!(0.05),
//!     dec!(100),
//!     DayCountConvention::Thirty360BondBasis,
//!     Frequency::Semiannual,
//! )
//! .unwrap();
//! assert_eq!(accrued, dec!(1.25));
//! ```

use rust_decimal::Decimal;
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Date, Frequency};

use crate::error::AccrualError;
use crate::schedule::CouponPair;
use crate::types::BondDefinition;

/// Day count between two dates under a convention.
#[must_use]
pub fn day_count(convention: DayCountConvention, start: Date, end: Date) -> i64 {
    convention.day_count(start, end)
}

/// Calculator for accrued interest.
pub struct AccruedInterestCalculator;

impl AccruedInterestCalculator {
    /// Fraction of the coupon period `[last, next)` elapsed at `settlement`,
    /// in `[0, 1)`.
    ///
    /// 30/360 can count an accrued span as long as the whole period near
    /// month ends; the actual-day ratio is used in that case.
    pub fn accrual_fraction(
        settlement: Date,
        pair: CouponPair,
        day_count: DayCountConvention,
    ) -> Result<Decimal, AccrualError> {
        let zero_period = || AccrualError::ZeroPeriod {
            start: pair.last,
            end: pair.next,
        };

        let period_days = day_count.day_count(pair.last, pair.next);
        if period_days <= 0 {
            return Err(zero_period());
        }
        let accrual_days = day_count.day_count(pair.last, settlement).max(0);

        let fraction = Decimal::from(accrual_days) / Decimal::from(period_days);
        if fraction < Decimal::ONE {
            return Ok(fraction);
        }

        let actual_period = pair.last.days_between(&pair.next);
        if actual_period <= 0 {
            return Err(zero_period());
        }
        let actual_accrued = pair.last.days_between(&settlement).clamp(0, actual_period - 1);
        log::debug!(
            "{} counts {accrual_days}/{period_days} days at {settlement}, using actual days",
            day_count.name()
        );
        Ok(Decimal::from(actual_accrued) / Decimal::from(actual_period))
    }

    /// Standard accrued interest.
    ///
    /// `coupon_rate` is a decimal (`0.05` for 5%); the result is in the same
    /// units as `face_value`.
    pub fn standard(
        settlement: Date,
        pair: CouponPair,
        coupon_rate: Decimal,
        face_value: Decimal,
        day_count: DayCountConvention,
        frequency: Frequency,
    ) -> Result<Decimal, AccrualError> {
        let periods_per_year = Decimal::from(frequency.periods_per_year());
        let period_coupon = face_value * coupon_rate / periods_per_year;
        let fraction = Self::accrual_fraction(settlement, pair, day_count)?;
        Ok(period_coupon * fraction)
    }

    /// Accrued interest of `bond` at `settlement`.
    pub fn for_bond(
        bond: &BondDefinition,
        pair: CouponPair,
        settlement: Date,
    ) -> Result<Decimal, AccrualError> {
        Self::standard(
            settlement,
            pair,
            bond.coupon_rate,
            bond.face_value,
            bond.day_count,
            bond.frequency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn pair(last: Date, next: Date) -> CouponPair {
        CouponPair { last, next }
    }

    #[test]
    fn test_zero_on_coupon_date() {
        let p = pair(date(2025, 2, 15), date(2025, 8, 15));
        for dc in DayCountConvention::all() {
            let accrued = AccruedInterestCalculator::standard(
                date(2025, 2, 15),
                p,
                dec!(0.03),
                dec!(100),
                *dc,
                Frequency::Semiannual,
            )
            .unwrap();
            assert_eq!(accrued, Decimal::ZERO, "{dc}");
        }
    }

    #[test]
    fn test_treasury_accrued() {
        // 135 of 181 days of a 1.5 coupon.
        let accrued = AccruedInterestCalculator::standard(
            date(2025, 6, 30),
            pair(date(2025, 2, 15), date(2025, 8, 15)),
            dec!(0.03),
            dec!(100),
            DayCountConvention::ActualActualBond,
            Frequency::Semiannual,
        )
        .unwrap();
        let expected = dec!(1.5) * dec!(135) / dec!(181);
        assert!((accrued - expected).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_thirty360_month_end_stays_below_coupon() {
        // Last coupon 31 Aug, next 28 Feb: 30/360 counts 178 days for the
        // period; settlement on the 27th counts 177.
        let p = pair(date(2024, 8, 31), date(2025, 2, 28));
        let fraction = AccruedInterestCalculator::accrual_fraction(
            date(2025, 2, 27),
            p,
            DayCountConvention::Thirty360BondBasis,
        )
        .unwrap();
        assert!(fraction < Decimal::ONE);
        assert!(fraction > dec!(0.99));
    }

    #[test]
    fn test_zero_period_rejected() {
        let d = date(2025, 2, 15);
        assert!(matches!(
            AccruedInterestCalculator::accrual_fraction(d, pair(d, d), DayCountConvention::Actual360),
            Err(AccrualError::ZeroPeriod { .. })
        ));
    }

    #[test]
    fn test_day_count_contract() {
        let start = date(2025, 1, 31);
        let end = date(2025, 3, 31);
        assert_eq!(day_count(DayCountConvention::Thirty360BondBasis, start, end), 60);
        assert_eq!(day_count(DayCountConvention::Actual360, start, end), 59);
    }

    proptest::proptest! {
        #[test]
        fn prop_accrued_within_bounds(offset in 0i64..400, months in 0usize..4) {
            let frequency = Frequency::all()[months];
            let last = date(2024, 1, 31).add_days(offset);
            let next = last.add_months(frequency.months_per_period() as i32).unwrap();
            let span = last.days_between(&next);
            for dc in DayCountConvention::all() {
                for step in [0, 1, span / 2, span - 1] {
                    let settle = last.add_days(step);
                    let accrued = AccruedInterestCalculator::standard(
                        settle,
                        pair(last, next),
                        dec!(0.06),
                        dec!(100),
                        *dc,
                        frequency,
                    )
                    .unwrap();
                    let coupon = dec!(6) / Decimal::from(frequency.periods_per_year());
                    proptest::prop_assert!(accrued >= Decimal::ZERO);
                    proptest::prop_assert!(accrued < coupon, "{dc} {last} {settle} {next}");
                }
            }
        }
    }
}
