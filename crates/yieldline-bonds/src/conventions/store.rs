//! Convention store lookup.
//!
//! The resolver consumes reference data only through [`ConventionStore`];
//! where the data lives is the caller's business. [`InMemoryConventionStore`]
//! is the snapshot implementation, loadable from JSON.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yieldline_core::calendars::{BusinessDayConvention, CalendarRegion};
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Currency, Date, Frequency};

use super::record::{Confidence, ConventionRecord, ConventionSource};
use crate::error::StoreError;
use crate::types::BondTerms;

/// Describes a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Display name.
    pub name: String,
    /// Whether the store holds validated reference data.
    pub validated: bool,
}

/// Read-only convention lookup by ISIN or ticker.
///
/// Implementations must be shareable across batch workers.
pub trait ConventionStore: Send + Sync {
    /// Looks up a key.
    fn lookup(&self, key: &str) -> Option<ConventionRecord>;

    /// Store description.
    fn metadata(&self) -> StoreMetadata;
}

/// One row of a JSON convention table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConvention {
    /// ISIN or ticker.
    pub key: String,
    /// Day count basis.
    pub day_count: DayCountConvention,
    /// Business day adjustment.
    #[serde(default)]
    pub business_day: BusinessDayConvention,
    /// Coupon frequency.
    #[serde(default)]
    pub frequency: Frequency,
    /// Holiday calendar.
    #[serde(default)]
    pub calendar: CalendarRegion,
    /// Settlement lag.
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
    /// Currency.
    #[serde(default)]
    pub currency: Currency,
    /// Coupon rate, decimal.
    #[serde(default)]
    pub coupon_rate: Option<Decimal>,
    /// Maturity.
    #[serde(default)]
    pub maturity: Option<Date>,
    /// Issue date.
    #[serde(default)]
    pub issue_date: Option<Date>,
}

fn default_settlement_days() -> u32 {
    2
}

impl StoredConvention {
    fn into_record(self) -> ConventionRecord {
        let terms = match (self.coupon_rate, self.maturity) {
            (Some(coupon_rate), Some(maturity)) => Some(BondTerms {
                coupon_rate,
                maturity,
                issue_date: self.issue_date,
                face_value: None,
            }),
            _ => None,
        };
        ConventionRecord {
            key: self.key.trim().to_uppercase(),
            day_count: self.day_count,
            business_day: self.business_day,
            frequency: self.frequency,
            calendar: self.calendar,
            settlement_days: self.settlement_days,
            currency: self.currency,
            confidence: Confidence::High,
            source: ConventionSource::ExactIsinMatch,
            sample_size: 0,
            terms,
        }
    }
}

/// Immutable-after-load convention table keyed by upper-cased ISIN or ticker.
#[derive(Debug, Clone)]
pub struct InMemoryConventionStore {
    metadata: StoreMetadata,
    records: HashMap<String, ConventionRecord>,
}

impl InMemoryConventionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(name: impl Into<String>, validated: bool) -> Self {
        Self {
            metadata: StoreMetadata {
                name: name.into(),
                validated,
            },
            records: HashMap::new(),
        }
    }

    /// Loads a JSON array of [`StoredConvention`] rows.
    pub fn from_json_str(
        name: impl Into<String>,
        validated: bool,
        json: &str,
    ) -> Result<Self, StoreError> {
        let rows: Vec<StoredConvention> = serde_json::from_str(json)?;
        let mut store = Self::new(name, validated);
        for row in rows {
            store.insert(row.into_record());
        }
        Ok(store)
    }

    /// Adds or replaces a record.
    pub fn insert(&mut self, record: ConventionRecord) {
        self.records.insert(record.key.trim().to_uppercase(), record);
    }

    /// Adds a record, builder style.
    #[must_use]
    pub fn with_record(mut self, record: ConventionRecord) -> Self {
        self.insert(record);
        self
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ConventionStore for InMemoryConventionStore {
    fn lookup(&self, key: &str) -> Option<ConventionRecord> {
        self.records.get(&key.trim().to_uppercase()).cloned()
    }

    fn metadata(&self) -> StoreMetadata {
        self.metadata.clone()
    }
}
