//! Actual/Actual day count conventions.
//!
//! The three variants differ only in how leap days are attributed, which is
//! why each is its own type rather than a flag on a shared one.
//!
//! The difference shows only in year fractions. `day_count` is plain
//! calendar days for all three, and the bond pipeline works from day-count
//! ratios within a coupon period with times of `(w + i) / f`, so the choice
//! between them never moves a price, yield or accrued amount. Year
//! fractions are here for callers that need an annualized accrual.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::{is_leap_year, Date};

/// Actual/Actual ISDA.
///
/// Splits the period at calendar year boundaries: days falling in leap years
/// are divided by 366, all other days by 365.
///
/// $$\text{YF} = \frac{\text{days in non-leap years}}{365} + \frac{\text{days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start >= end {
            return -self.year_fraction_forward(end, start);
        }
        self.year_fraction_forward(start, end)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

impl ActActIsda {
    fn year_fraction_forward(&self, start: Date, end: Date) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut current = start;

        while current < end {
            let Ok(next_year) = Date::from_ymd(current.year() + 1, 1, 1) else {
                break;
            };
            let segment_end = if next_year < end { next_year } else { end };
            let days = current.days_between(&segment_end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = segment_end;
        }

        total
    }
}

/// Actual/Actual Bond.
///
/// Actual days over 366 when the accrual window `(start, end]` contains a
/// 29 February, otherwise over 365. Used for US Treasuries when no coupon
/// period is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActBond;

impl ActActBond {
    /// Returns true if a 29 February falls in `(start, end]`.
    #[must_use]
    pub fn contains_leap_day(start: Date, end: Date) -> bool {
        (start.year()..=end.year())
            .filter(|year| is_leap_year(*year))
            .filter_map(|year| Date::from_ymd(year, 2, 29).ok())
            .any(|leap_day| leap_day > start && leap_day <= end)
    }
}

impl DayCount for ActActBond {
    fn name(&self) -> &'static str {
        "ACT/ACT Bond"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let basis = if Self::contains_leap_day(lo, hi) { 366 } else { 365 };
        Decimal::from(start.days_between(&end)) / Decimal::from(basis)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ISMA (ICMA Rule 251).
///
/// The year fraction is the actual days accrued divided by
/// `frequency × actual days in the reference coupon period`, so every full
/// coupon period is exactly `1 / frequency` years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsma;

impl DayCount for ActActIsma {
    fn name(&self) -> &'static str {
        "ACT/ACT ISMA"
    }

    /// Without a reference period the actual days are taken over 365.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(start.days_between(&end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn year_fraction_in_period(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
        periods_per_year: u32,
    ) -> Decimal {
        let days_in_period = period_start.days_between(&period_end);
        if days_in_period <= 0 || periods_per_year == 0 {
            return self.year_fraction(start, end);
        }
        Decimal::from(start.days_between(&end))
            / (Decimal::from(periods_per_year) * Decimal::from(days_in_period))
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
    fn test_isda_single_year() {
        let dc = ActActIsda;
        assert_eq!(dc.year_fraction(d(2025, 1, 1), d(2026, 1, 1)), dec!(1));
        assert_eq!(dc.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), dec!(1));
    }

    #[test]
    fn test_isda_splits_across_years() {
        let dc = ActActIsda;
        // 2024-07-01..2025-01-01 = 184 leap-year days, then 181 days in 2025
        let yf = dc.year_fraction(d(2024, 7, 1), d(2025, 7, 1));
        let expected = dec!(184) / dec!(366) + dec!(181) / dec!(365);
        assert_eq!(yf, expected);
    }

    #[test]
    fn test_isda_reversed() {
        let dc = ActActIsda;
        let forward = dc.year_fraction(d(2024, 7, 1), d(2025, 7, 1));
        let backward = dc.year_fraction(d(2025, 7, 1), d(2024, 7, 1));
        assert_eq!(forward, -backward);
    }

    #[test]
    fn test_bond_leap_day_detection() {
        assert!(ActActBond::contains_leap_day(d(2024, 2, 15), d(2024, 8, 15)));
        assert!(ActActBond::contains_leap_day(d(2024, 2, 28), d(2024, 2, 29)));
        assert!(!ActActBond::contains_leap_day(d(2024, 2, 29), d(2024, 8, 29)));
        assert!(!ActActBond::contains_leap_day(d(2025, 2, 15), d(2025, 8, 15)));
    }

    #[test]
    fn test_bond_basis() {
        let dc = ActActBond;
        assert_eq!(
            dc.year_fraction(d(2025, 2, 15), d(2025, 8, 15)),
            dec!(181) / dec!(365)
        );
        assert_eq!(
            dc.year_fraction(d(2024, 2, 15), d(2024, 8, 15)),
            dec!(182) / dec!(366)
        );
    }

    #[test]
    fn test_isma_full_period_is_one_over_frequency() {
        let dc = ActActIsma;
        let start = d(2025, 2, 15);
        let end = d(2025, 8, 15);
        assert_eq!(dc.year_fraction_in_period(start, end, start, end, 2), dec!(0.5));

        let annual_start = d(2024, 3, 1);
        let annual_end = d(2025, 3, 1);
        assert_eq!(
            dc.year_fraction_in_period(annual_start, annual_end, annual_start, annual_end, 1),
            dec!(1)
        );
    }

    #[test]
    fn test_isma_partial_period() {
        let dc = ActActIsma;
        let yf = dc.year_fraction_in_period(
            d(2025, 2, 15),
            d(2025, 6, 30),
            d(2025, 2, 15),
            d(2025, 8, 15),
            2,
        );
        assert_eq!(yf, dec!(135) / dec!(362));
    }

    #[test]
    fn test_variants_differ_on_leap_periods() {
        let start = d(2023, 11, 15);
        let end = d(2024, 5, 15);
        let isda = ActActIsda.year_fraction(start, end);
        let bond = ActActBond.year_fraction(start, end);
        let isma = ActActIsma.year_fraction_in_period(start, end, start, end, 2);
        assert_ne!(isda, bond);
        assert_ne!(bond, isma);
        assert_eq!(isma, dec!(0.5));
    }

    #[test]
    fn test_day_counts_agree_across_variants() {
        let start = d(2023, 11, 15);
        let end = d(2024, 5, 15);
        assert_eq!(ActActIsda.day_count(start, end), 182);
        assert_eq!(ActActBond.day_count(start, end), 182);
        assert_eq!(ActActIsma.day_count(start, end), 182);
    }
}
