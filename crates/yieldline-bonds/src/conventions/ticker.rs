//! Ticker-level convention statistics.
//!
//! Built from the conventions observed on an issuer's outstanding bonds.
//! The most common `(day count, business day, frequency)` combination wins;
//! confidence reflects how dominant it is and how many bonds were seen.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use yieldline_core::calendars::BusinessDayConvention;
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::Frequency;

use super::record::Confidence;
use crate::error::StoreError;

/// Share of the sample needed for High confidence.
pub const HIGH_SHARE: f64 = 0.8;
/// Share of the sample needed for Medium confidence.
pub const MEDIUM_SHARE: f64 = 0.6;
/// Below this many observations confidence is at most Low.
pub const MIN_SAMPLE_MEDIUM: u32 = 3;
/// Below this many observations confidence is at most Medium.
pub const MIN_SAMPLE_HIGH: u32 = 10;

/// Conventions seen on one bond of an issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerObservation {
    /// Issuer ticker.
    pub ticker: String,
    /// Day count basis.
    pub day_count: DayCountConvention,
    /// Business day adjustment.
    pub business_day: BusinessDayConvention,
    /// Coupon frequency.
    pub frequency: Frequency,
}

/// Dominant conventions for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerStatistic {
    /// Issuer ticker.
    pub ticker: String,
    /// Dominant day count.
    pub day_count: DayCountConvention,
    /// Dominant business day convention.
    pub business_day: BusinessDayConvention,
    /// Dominant frequency.
    pub frequency: Frequency,
    /// Bonds observed.
    pub sample_size: u32,
    /// Fraction of the sample using the dominant combination.
    pub dominant_share: f64,
    /// Confidence from share and sample size.
    pub confidence: Confidence,
}

type Combination = (DayCountConvention, BusinessDayConvention, Frequency);

/// Confidence for a dominant share observed over `sample_size` bonds.
#[must_use]
pub fn statistical_confidence(dominant_share: f64, sample_size: u32) -> Confidence {
    let by_share = if dominant_share >= HIGH_SHARE {
        Confidence::High
    } else if dominant_share >= MEDIUM_SHARE {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    let cap = if sample_size < MIN_SAMPLE_MEDIUM {
        Confidence::Low
    } else if sample_size < MIN_SAMPLE_HIGH {
        Confidence::Medium
    } else {
        Confidence::High
    };
    by_share.min(cap)
}

/// Ticker → dominant conventions.
#[derive(Debug, Clone, Default)]
pub struct TickerConventionTable {
    stats: HashMap<String, TickerStatistic>,
}

impl TickerConventionTable {
    /// Builds the table. Ties go to the combination observed first.
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = TickerObservation>,
    {
        let mut grouped: HashMap<String, Vec<(Combination, u32)>> = HashMap::new();
        for obs in observations {
            let combos = grouped.entry(obs.ticker.trim().to_uppercase()).or_default();
            let combo = (obs.day_count, obs.business_day, obs.frequency);
            match combos.iter_mut().find(|(c, _)| *c == combo) {
                Some((_, count)) => *count += 1,
                None => combos.push((combo, 1)),
            }
        }

        let stats = grouped
            .into_iter()
            .filter_map(|(ticker, combos)| {
                let sample_size: u32 = combos.iter().map(|(_, n)| n).sum();
                // First maximum in observation order.
                let (combo, count) = combos
                    .iter()
                    .fold(None, |best: Option<&(Combination, u32)>, item| match best {
                        Some(b) if b.1 >= item.1 => Some(b),
                        _ => Some(item),
                    })?;
                let dominant_share = f64::from(*count) / f64::from(sample_size);
                let stat = TickerStatistic {
                    ticker: ticker.clone(),
                    day_count: combo.0,
                    business_day: combo.1,
                    frequency: combo.2,
                    sample_size,
                    dominant_share,
                    confidence: statistical_confidence(dominant_share, sample_size),
                };
                Some((ticker, stat))
            })
            .collect();

        Self { stats }
    }

    /// Loads a JSON array of [`TickerObservation`] rows.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let rows: Vec<TickerObservation> = serde_json::from_str(json)?;
        Ok(Self::from_observations(rows))
    }

    /// Statistic for a ticker.
    #[must_use]
    pub fn lookup(&self, ticker: &str) -> Option<&TickerStatistic> {
        self.stats.get(&ticker.trim().to_uppercase())
    }

    /// Number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True when the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
