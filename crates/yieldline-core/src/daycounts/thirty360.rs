//! 30/360 Bond Basis.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 Bond Basis.
///
/// Every month counts as 30 days and every year as 360. The only adjustments are:
///
/// 1. If D1 is 31, set D1 = 30.
/// 2. If D2 is 31 and D1 is 30 or 31, set D2 = 30.
///
/// There is no February end-of-month rule.
///
/// # Formula
///
/// $$\text{Days} = 360(Y_2 - Y_1) + 30(M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360BondBasis;

impl DayCount for Thirty360BondBasis {
    fn name(&self) -> &'static str {
        "30/360 Bond Basis"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        let years = i64::from(end.year() - start.year());
        let months = i64::from(end.month()) - i64::from(start.month());

        360 * years + 30 * months + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_full_year() {
        let dc = Thirty360BondBasis;
        assert_eq!(dc.day_count(d(2025, 1, 15), d(2026, 1, 15)), 360);
        assert_eq!(dc.year_fraction(d(2025, 1, 15), d(2026, 1, 15)), dec!(1));
    }

    #[test]
    fn test_half_year() {
        let dc = Thirty360BondBasis;
        assert_eq!(dc.day_count(d(2025, 2, 15), d(2025, 8, 15)), 180);
        assert_eq!(dc.year_fraction(d(2025, 2, 15), d(2025, 8, 15)), dec!(0.5));
    }

    #[test]
    fn test_d1_31_becomes_30() {
        let dc = Thirty360BondBasis;
        // D1=31->30, D2=30: 30*(6-5) + 0 = 30
        assert_eq!(dc.day_count(d(2025, 5, 31), d(2025, 6, 30)), 30);
    }

    #[test]
    fn test_d2_31_only_when_d1_at_least_30() {
        let dc = Thirty360BondBasis;
        // D1=30 so D2=31->30
        assert_eq!(dc.day_count(d(2025, 4, 30), d(2025, 7, 31)), 90);
        // D1=15 so D2 stays 31
        assert_eq!(dc.day_count(d(2025, 4, 15), d(2025, 7, 31)), 106);
    }

    #[test]
    fn test_no_february_rule() {
        let dc = Thirty360BondBasis;
        // Feb 28 is left alone: 30*(3-2) + (31-28) = 33
        assert_eq!(dc.day_count(d(2025, 2, 28), d(2025, 3, 31)), 33);
        assert_eq!(dc.day_count(d(2025, 2, 28), d(2025, 8, 28)), 180);
    }

    #[test]
    fn test_reversed_dates_negative() {
        let dc = Thirty360BondBasis;
        assert_eq!(dc.day_count(d(2025, 8, 15), d(2025, 2, 15)), -180);
    }
}
