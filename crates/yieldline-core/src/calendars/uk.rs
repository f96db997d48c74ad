//! UK bank holiday calendar (England and Wales).

use chrono::Weekday;

use super::{is_easter_offset, is_last_weekday, is_nth_weekday, Calendar};
use crate::types::Date;

/// UK bank holidays, rule based.
///
/// Weekend New Year, Christmas and Boxing Day holidays move to the next
/// free weekday. One-off royal holidays are not included.
#[derive(Debug, Clone, Copy, Default)]
pub struct UKCalendar;

impl UKCalendar {
    fn is_bank_holiday(&self, date: Date) -> bool {
        let weekday = date.weekday();
        let substitute = matches!(weekday, Weekday::Mon | Weekday::Tue);

        match (date.month(), date.day()) {
            (1, 1) | (12, 25) | (12, 26) => return true,
            (1, 2) | (1, 3) if weekday == Weekday::Mon => return true,
            (12, 27) | (12, 28) if substitute => return true,
            _ => {}
        }

        if is_easter_offset(date, -2) || is_easter_offset(date, 1) {
            return true;
        }

        match date.month() {
            5 => is_nth_weekday(date, Weekday::Mon, 1) || is_last_weekday(date, Weekday::Mon),
            8 => is_last_weekday(date, Weekday::Mon),
            _ => false,
        }
    }
}

impl Calendar for UKCalendar {
    fn name(&self) -> &'static str {
        "UK"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_bank_holiday(date)
    }
}
