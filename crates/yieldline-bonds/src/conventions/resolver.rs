//! Tiered convention resolution.
//!
//! Tiers, first hit wins:
//!
//! 1. ISIN in the primary (validated) store: High.
//! 2. ISIN in the secondary store: High if that store is validated, else Medium.
//! 3. Ticker statistics: High/Medium/Low from the statistic.
//! 4. Parsed description with category defaults: Medium.
//! 5. Generic category defaults: VeryLow.
//!
//! Resolution only fails when the identifier carries nothing at all.

use std::sync::Arc;

use yieldline_core::Date;

use super::record::{Confidence, ConventionRecord, ConventionSource};
use super::store::ConventionStore;
use super::ticker::TickerConventionTable;
use crate::error::ResolutionError;
use crate::identifiers::{Identifier, Isin};
use crate::parser::{DescriptionParser, DescriptionPattern, ParsedDescription};
use crate::types::{BondCategory, BondDefinition, BondTerms, ConventionBundle};

/// A bond definition together with the record it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBond {
    /// Canonical bond.
    pub definition: BondDefinition,
    /// Conventions and their provenance.
    pub record: ConventionRecord,
}

/// Resolves identifiers to conventions.
///
/// Stores are shared read-only snapshots; refresh them between batches.
#[derive(Clone)]
pub struct ConventionResolver {
    primary: Option<Arc<dyn ConventionStore>>,
    secondary: Option<Arc<dyn ConventionStore>>,
    tickers: Option<Arc<TickerConventionTable>>,
    parser: DescriptionParser,
}

impl std::fmt::Debug for ConventionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionResolver")
            .field("primary", &self.primary.as_ref().map(|s| s.metadata().name))
            .field("secondary", &self.secondary.as_ref().map(|s| s.metadata().name))
            .field("tickers", &self.tickers.as_ref().map(|t| t.len()))
            .field("as_of", &self.parser.as_of())
            .finish()
    }
}

impl ConventionResolver {
    /// Resolver with no stores; only parsing and category defaults apply.
    #[must_use]
    pub fn new(as_of: Date) -> Self {
        Self {
            primary: None,
            secondary: None,
            tickers: None,
            parser: DescriptionParser::new(as_of),
        }
    }

    /// Sets the validated reference store.
    #[must_use]
    pub fn with_primary_store(mut self, store: Arc<dyn ConventionStore>) -> Self {
        self.primary = Some(store);
        self
    }

    /// Sets the secondary/benchmark index store.
    #[must_use]
    pub fn with_secondary_store(mut self, store: Arc<dyn ConventionStore>) -> Self {
        self.secondary = Some(store);
        self
    }

    /// Sets the ticker statistics.
    #[must_use]
    pub fn with_ticker_table(mut self, table: Arc<TickerConventionTable>) -> Self {
        self.tickers = Some(table);
        self
    }

    /// The description parser used by tier 4.
    #[must_use]
    pub fn parser(&self) -> &DescriptionParser {
        &self.parser
    }

    /// Resolves conventions for an identifier.
    ///
    /// `price` is carried into the log context only.
    pub fn resolve(&self, id: &Identifier, price: f64) -> Result<ConventionRecord, ResolutionError> {
        if id.is_empty() {
            return Err(ResolutionError::NoIdentifyingInformation);
        }

        let isin = id.parsed_isin();
        let country = isin.as_ref().map(|i| i.country_code().to_string());
        let parsed = id.description.as_deref().and_then(|desc| {
            self.parser
                .parse(desc, id.isin.as_deref())
                .map_err(|err| log::debug!("description '{desc}' not parsed: {err}"))
                .ok()
        });
        let parsed_terms = parsed
            .as_ref()
            .map(|p| BondTerms::new(p.coupon_rate(), p.maturity));

        let record = self
            .store_tier(isin.as_ref())
            .or_else(|| self.ticker_tier(id, parsed.as_ref(), country.as_deref()))
            .or_else(|| Self::parse_tier(id, parsed.as_ref(), country.as_deref()))
            .unwrap_or_else(|| Self::generic_tier(id, isin.as_ref(), country.as_deref()));

        let record = if record.terms.is_none() {
            record.with_terms(parsed_terms)
        } else {
            record
        };

        log::debug!(
            "resolved {} via {} ({} confidence, price {price})",
            record.key,
            record.source,
            record.confidence
        );
        Ok(record)
    }

    /// Resolves conventions and builds the bond.
    ///
    /// Caller-supplied terms take precedence over terms known to the
    /// resolution tier.
    pub fn resolve_bond(
        &self,
        id: &Identifier,
        price: f64,
        supplied_terms: Option<&BondTerms>,
    ) -> Result<ResolvedBond, ResolutionError> {
        let record = self.resolve(id, price)?;
        let terms = supplied_terms
            .or(record.terms.as_ref())
            .cloned()
            .ok_or_else(|| ResolutionError::IncompleteTerms {
                key: record.key.clone(),
                missing: "coupon and maturity",
            })?;

        let mut definition =
            BondDefinition::new(record.key.clone(), terms.coupon_rate, terms.maturity, record.bundle());
        if let Some(issue) = terms.issue_date {
            definition = definition.with_issue_date(issue);
        }
        if let Some(face) = terms.face_value {
            definition = definition.with_face_value(face);
        }
        definition.validate()?;

        Ok(ResolvedBond { definition, record })
    }

    fn store_tier(&self, isin: Option<&Isin>) -> Option<ConventionRecord> {
        let isin = isin?;
        if let Some(record) = self.primary.as_ref().and_then(|s| s.lookup(isin.as_str())) {
            return Some(record.tagged(Confidence::High, ConventionSource::ExactIsinMatch));
        }
        let store = self.secondary.as_ref()?;
        let record = store.lookup(isin.as_str())?;
        let confidence = if store.metadata().validated {
            Confidence::High
        } else {
            Confidence::Medium
        };
        Some(record.tagged(confidence, ConventionSource::SecondaryIndex))
    }

    fn ticker_tier(
        &self,
        id: &Identifier,
        parsed: Option<&ParsedDescription>,
        country: Option<&str>,
    ) -> Option<ConventionRecord> {
        let table = self.tickers.as_ref()?;
        let ticker = id
            .ticker_hint()
            .or_else(|| parsed.map(|p| p.issuer.to_uppercase()))?;
        let stat = table.lookup(&ticker)?;

        // Calendar, lag and currency are not part of the statistic.
        let category = BondCategory::classify(&ticker).unwrap_or(BondCategory::Corporate);
        let bundle = ConventionBundle {
            day_count: stat.day_count,
            business_day: stat.business_day,
            frequency: stat.frequency,
            ..category.bundle_for(country)
        };
        let mut record = ConventionRecord::from_bundle(
            ticker,
            bundle,
            stat.confidence,
            ConventionSource::TickerStatistical,
        );
        record.sample_size = stat.sample_size;
        Some(record)
    }

    fn parse_tier(
        id: &Identifier,
        parsed: Option<&ParsedDescription>,
        country: Option<&str>,
    ) -> Option<ConventionRecord> {
        let parsed = parsed?;
        let category = match parsed.pattern {
            DescriptionPattern::Treasury => BondCategory::Treasury,
            DescriptionPattern::International => BondCategory::classify(&parsed.issuer)
                .filter(|c| *c != BondCategory::Treasury)
                .unwrap_or(BondCategory::International),
            DescriptionPattern::Corporate => id
                .description
                .as_deref()
                .and_then(BondCategory::classify)
                .unwrap_or_else(|| BondCategory::generic(id.parsed_isin().as_ref(), None)),
        };
        log::debug!("description of {} classified as {category}", id.key());
        Some(ConventionRecord::from_bundle(
            id.key(),
            category.bundle_for(country),
            Confidence::Medium,
            ConventionSource::ParsedDescription,
        ))
    }

    fn generic_tier(id: &Identifier, isin: Option<&Isin>, country: Option<&str>) -> ConventionRecord {
        let category = BondCategory::generic(isin, id.description.as_deref());
        log::warn!(
            "no reference data for {}, using generic {category} conventions",
            id.key()
        );
        ConventionRecord::from_bundle(
            id.key(),
            category.bundle_for(country),
            Confidence::VeryLow,
            ConventionSource::GenericFallback,
        )
    }
}
