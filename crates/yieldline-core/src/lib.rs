//! # Yieldline Core
//!
//! Core types and market conventions for the Yieldline fixed income analytics library.
//!
//! This crate provides the foundational building blocks used throughout Yieldline:
//!
//! - **Types**: `Date`, `Frequency`, `Currency`
//! - **Day Count Conventions**: one strategy type per convention, selected through
//!   the closed [`DayCountConvention`](daycounts::DayCountConvention) enum
//! - **Business Day Calendars**: holiday calendars per region and the
//!   [`BusinessDayConvention`](calendars::BusinessDayConvention) adjustment rules
//!
//! ## Example
//!
//! ```rust
//! use yieldline_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 2, 15).unwrap();
//! let end = Date::from_ymd(2025, 8, 15).unwrap();
//!
//! let days = DayCountConvention::Thirty360BondBasis.day_count(start, end);
//! assert_eq!(days, 180);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, CalendarRegion};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Currency, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, Date, Frequency};
