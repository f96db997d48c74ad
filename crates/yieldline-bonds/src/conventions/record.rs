//! Resolved convention records.

use serde::{Deserialize, Serialize};
use yieldline_core::calendars::{BusinessDayConvention, CalendarRegion};
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Currency, Frequency};

use crate::types::{BondTerms, ConventionBundle};

/// How much the resolved conventions can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// Validated reference data.
    High,
    /// Unvalidated reference data, a strong statistic, or a clean parse.
    Medium,
    /// Weak statistic.
    Low,
    /// Category guess.
    VeryLow,
}

impl Confidence {
    /// Ordinal rank, higher is better.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Confidence::High => 3,
            Confidence::Medium => 2,
            Confidence::Low => 1,
            Confidence::VeryLow => 0,
        }
    }

    /// The lower of two confidences.
    #[must_use]
    pub fn min(self, other: Confidence) -> Confidence {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::VeryLow => "VeryLow",
        };
        write!(f, "{name}")
    }
}

/// Resolution tier that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConventionSource {
    /// ISIN found in the validated reference store.
    ExactIsinMatch,
    /// ISIN found in a secondary or benchmark index store.
    SecondaryIndex,
    /// Ticker statistics.
    TickerStatistical,
    /// Category defaults applied to a parsed description.
    ParsedDescription,
    /// Generic category defaults.
    GenericFallback,
}

impl std::fmt::Display for ConventionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConventionSource::ExactIsinMatch => "ExactIsinMatch",
            ConventionSource::SecondaryIndex => "SecondaryIndex",
            ConventionSource::TickerStatistical => "TickerStatistical",
            ConventionSource::ParsedDescription => "ParsedDescription",
            ConventionSource::GenericFallback => "GenericFallback",
        };
        write!(f, "{name}")
    }
}

/// Conventions resolved for one identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConventionRecord {
    /// ISIN, ticker or issuer the record was resolved for.
    pub key: String,
    /// Day count basis.
    pub day_count: DayCountConvention,
    /// Business day adjustment.
    pub business_day: BusinessDayConvention,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Holiday calendar.
    pub calendar: CalendarRegion,
    /// Settlement lag in business days.
    pub settlement_days: u32,
    /// Currency.
    pub currency: Currency,
    /// Trust in the conventions.
    pub confidence: Confidence,
    /// Tier that produced the record.
    pub source: ConventionSource,
    /// Observations behind a statistical record, zero otherwise.
    pub sample_size: u32,
    /// Coupon and maturity, when the tier knows them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<BondTerms>,
}

impl ConventionRecord {
    /// Record carrying a category bundle.
    #[must_use]
    pub fn from_bundle(
        key: impl Into<String>,
        bundle: ConventionBundle,
        confidence: Confidence,
        source: ConventionSource,
    ) -> Self {
        Self {
            key: key.into(),
            day_count: bundle.day_count,
            business_day: bundle.business_day,
            frequency: bundle.frequency,
            calendar: bundle.calendar,
            settlement_days: bundle.settlement_days,
            currency: bundle.currency,
            confidence,
            source,
            sample_size: 0,
            terms: None,
        }
    }

    /// The convention fields as a bundle.
    #[must_use]
    pub fn bundle(&self) -> ConventionBundle {
        ConventionBundle {
            day_count: self.day_count,
            business_day: self.business_day,
            frequency: self.frequency,
            calendar: self.calendar,
            settlement_days: self.settlement_days,
            currency: self.currency,
        }
    }

    /// Attaches economic terms.
    #[must_use]
    pub fn with_terms(mut self, terms: Option<BondTerms>) -> Self {
        self.terms = terms;
        self
    }

    /// Re-tags the record with the tier that found it.
    #[must_use]
    pub fn tagged(mut self, confidence: Confidence, source: ConventionSource) -> Self {
        self.confidence = confidence;
        self.source = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BondCategory;

    #[test]
    fn test_confidence_min() {
        assert_eq!(Confidence::High.min(Confidence::Low), Confidence::Low);
        assert_eq!(Confidence::VeryLow.min(Confidence::Medium), Confidence::VeryLow);
    }

    #[test]
    fn test_bundle_roundtrip() {
        let bundle = BondCategory::Financial.bundle();
        let record = ConventionRecord::from_bundle(
            "JPM",
            bundle,
            Confidence::Medium,
            ConventionSource::ParsedDescription,
        );
        assert_eq!(record.bundle(), bundle);
        assert_eq!(record.frequency, Frequency::Quarterly);
    }

    #[test]
    fn test_wire_names() {
        let record = ConventionRecord::from_bundle(
            "X",
            BondCategory::Treasury.bundle(),
            Confidence::VeryLow,
            ConventionSource::GenericFallback,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["confidence"], "VeryLow");
        assert_eq!(json["source"], "GenericFallback");
        assert_eq!(json["day_count"], "ActualActual_Bond");
        assert!(json.get("terms").is_none());
    }
}
