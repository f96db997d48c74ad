//! TARGET settlement calendar (euro area).

use super::{is_easter_offset, Calendar};
use crate::types::Date;

/// TARGET2 closing days: New Year, Good Friday, Easter Monday, Labour Day,
/// Christmas and 26 December. No weekend substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetCalendar;

impl Calendar for TargetCalendar {
    fn name(&self) -> &'static str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }
        let fixed = matches!(
            (date.month(), date.day()),
            (1, 1) | (5, 1) | (12, 25) | (12, 26)
        );
        !(fixed || is_easter_offset(date, -2) || is_easter_offset(date, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_target_holidays_2025() {
        let cal = TargetCalendar;
        assert!(!cal.is_business_day(d(2025, 1, 1)));
        assert!(!cal.is_business_day(d(2025, 4, 18)));
        assert!(!cal.is_business_day(d(2025, 4, 21)));
        assert!(!cal.is_business_day(d(2025, 5, 1)));
        assert!(!cal.is_business_day(d(2025, 12, 25)));
        assert!(!cal.is_business_day(d(2025, 12, 26)));
    }

    #[test]
    fn test_target_ordinary_days() {
        let cal = TargetCalendar;
        assert!(cal.is_business_day(d(2025, 5, 26)));
        assert!(cal.is_business_day(d(2025, 12, 31)));
    }
}
