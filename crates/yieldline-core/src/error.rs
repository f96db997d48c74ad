//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, calendars, and convention vocabularies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },

    /// A convention name that is not part of the supported vocabulary.
    #[error("unknown {axis} convention: '{value}'")]
    UnknownConvention {
        /// Convention axis (day count, business day, frequency, ...).
        axis: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(axis: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownConvention {
            axis,
            value: value.into(),
        }
    }
}
