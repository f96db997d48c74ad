//! Bond categories and their default convention bundles.
//!
//! When no reference data covers a bond, its conventions are inferred from
//! the category its description or ISIN prefix points to.

use serde::{Deserialize, Serialize};
use yieldline_core::calendars::{BusinessDayConvention, CalendarRegion};
use yieldline_core::daycounts::DayCountConvention;
use yieldline_core::{Currency, Frequency};

use crate::identifiers::Isin;

/// Broad bond category used to pick default conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondCategory {
    /// US Treasury notes and bonds.
    Treasury,
    /// US government-sponsored agencies.
    Agency,
    /// US municipal bonds.
    Municipal,
    /// Technology issuers.
    Tech,
    /// Banks, brokers and insurers.
    Financial,
    /// Utilities.
    Utility,
    /// Sub-investment-grade corporates.
    HighYield,
    /// Eurobonds and other non-US issues.
    International,
    /// Generic corporate.
    Corporate,
}

/// Conventions implied by a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionBundle {
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
}

const fn us_bundle(
    day_count: DayCountConvention,
    business_day: BusinessDayConvention,
    frequency: Frequency,
    settlement_days: u32,
) -> ConventionBundle {
    ConventionBundle {
        day_count,
        business_day,
        frequency,
        calendar: CalendarRegion::UnitedStates,
        settlement_days,
        currency: Currency::USD,
    }
}

// Matched as whole words against the upper-cased description.
const TREASURY_WORDS: &[&str] = &["UST", "US TREASURY", "TREASURY", "TSY", "T-BOND", "T-NOTE"];
const AGENCY_WORDS: &[&str] = &[
    "FNMA", "FHLMC", "FHLB", "FFCB", "FANNIE MAE", "FREDDIE MAC", "FEDERAL HOME LOAN",
];
const MUNICIPAL_WORDS: &[&str] = &[
    "MUNI", "MUNICIPAL", "CITY OF", "STATE OF", "COUNTY", "AUTHORITY", "SCHOOL DISTRICT",
    "REVENUE", "GO BONDS",
];
const HIGH_YIELD_WORDS: &[&str] = &["HY", "HIGH YIELD", "JUNK"];
const INTERNATIONAL_WORDS: &[&str] = &["EUROBOND", "EMTN", "INTL", "INTERNATIONAL", "EUR", "GBP"];
const FINANCIAL_WORDS: &[&str] = &[
    "JPM", "BAC", "WFC", "GS", "MS", "BANK", "BANCORP", "FINANCIAL", "CAPITAL", "JPMORGAN",
    "GOLDMAN", "MORGAN STANLEY", "CITIGROUP", "INSURANCE",
];
const UTILITY_WORDS: &[&str] = &[
    "DUK", "NEE", "AEP", "EXC", "ENERGY", "POWER", "ELECTRIC", "UTILITIES", "UTILITY", "GAS",
];
const TECH_WORDS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "ORCL", "IBM", "INTC", "CSCO", "NVDA", "APPLE",
    "MICROSOFT", "ALPHABET", "AMAZON", "ORACLE", "INTEL", "CISCO", "NVIDIA",
];

impl BondCategory {
    /// Default conventions for the category.
    #[must_use]
    pub const fn bundle(&self) -> ConventionBundle {
        use BusinessDayConvention::{Following, ModifiedFollowing, Unadjusted};
        use DayCountConvention::{ActualActualBond, ActualActualIsma, Thirty360BondBasis};
        match self {
            BondCategory::Treasury => us_bundle(ActualActualBond, Following, Frequency::Semiannual, 1),
            BondCategory::Agency => us_bundle(Thirty360BondBasis, Following, Frequency::Semiannual, 1),
            BondCategory::Municipal => {
                us_bundle(Thirty360BondBasis, Unadjusted, Frequency::Semiannual, 2)
            }
            BondCategory::Tech => {
                us_bundle(Thirty360BondBasis, ModifiedFollowing, Frequency::Semiannual, 2)
            }
            BondCategory::Financial => {
                us_bundle(Thirty360BondBasis, ModifiedFollowing, Frequency::Quarterly, 2)
            }
            BondCategory::Utility => us_bundle(Thirty360BondBasis, Following, Frequency::Annual, 2),
            BondCategory::Corporate => {
                us_bundle(Thirty360BondBasis, Following, Frequency::Semiannual, 2)
            }
            BondCategory::HighYield => us_bundle(Thirty360BondBasis, Following, Frequency::Semiannual, 3),
            BondCategory::International => ConventionBundle {
                day_count: ActualActualIsma,
                business_day: ModifiedFollowing,
                frequency: Frequency::Annual,
                calendar: CalendarRegion::Target,
                settlement_days: 2,
                currency: Currency::EUR,
            },
        }
    }

    /// Default conventions, with calendar and currency localized to the
    /// ISIN country for international issues.
    #[must_use]
    pub fn bundle_for(&self, country: Option<&str>) -> ConventionBundle {
        let mut bundle = self.bundle();
        if let (BondCategory::International, Some(country)) = (self, country) {
            if country != "US" {
                bundle.calendar = CalendarRegion::for_country(country);
                bundle.currency = Currency::for_country(country);
            }
        }
        bundle
    }

    /// Category implied by keywords in a description or issuer name.
    ///
    /// Returns `None` when nothing in the text is recognised.
    #[must_use]
    pub fn classify(text: &str) -> Option<Self> {
        let padded = padded_words(text);
        if padded.trim().is_empty() {
            return None;
        }
        if padded.starts_with(" T ") {
            return Some(BondCategory::Treasury);
        }
        let ordered: [(BondCategory, &[&str]); 8] = [
            (BondCategory::Treasury, TREASURY_WORDS),
            (BondCategory::Agency, AGENCY_WORDS),
            (BondCategory::Municipal, MUNICIPAL_WORDS),
            (BondCategory::HighYield, HIGH_YIELD_WORDS),
            (BondCategory::International, INTERNATIONAL_WORDS),
            (BondCategory::Financial, FINANCIAL_WORDS),
            (BondCategory::Utility, UTILITY_WORDS),
            (BondCategory::Tech, TECH_WORDS),
        ];
        ordered
            .iter()
            .find(|(_, words)| words.iter().any(|w| padded.contains(&format!(" {w} "))))
            .map(|(category, _)| *category)
    }

    /// Generic category used when every other resolution tier failed.
    ///
    /// Government for `US912`, agency for the GSE prefixes, municipal when
    /// the text says so, international for non-US ISINs, corporate otherwise.
    #[must_use]
    pub fn generic(isin: Option<&Isin>, text: Option<&str>) -> Self {
        if let Some(isin) = isin {
            if isin.is_us_treasury() {
                return BondCategory::Treasury;
            }
            if isin.is_us_agency() {
                return BondCategory::Agency;
            }
        }
        let padded = text.map(padded_words).unwrap_or_default();
        if MUNICIPAL_WORDS.iter().any(|w| padded.contains(&format!(" {w} "))) {
            return BondCategory::Municipal;
        }
        match isin {
            Some(isin) if isin.country_code() != "US" => BondCategory::International,
            _ => BondCategory::Corporate,
        }
    }

    /// Short name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BondCategory::Treasury => "Treasury",
            BondCategory::Agency => "Agency",
            BondCategory::Municipal => "Municipal",
            BondCategory::Tech => "Tech",
            BondCategory::Financial => "Financial",
            BondCategory::Utility => "Utility",
            BondCategory::HighYield => "HighYield",
            BondCategory::International => "International",
            BondCategory::Corporate => "Corporate",
        }
    }
}

impl std::fmt::Display for BondCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Upper-cased words separated by single spaces, padded on both ends.
fn padded_words(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_uppercase)
        .collect();
    format!(" {} ", words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasury_bundle() {
        let bundle = BondCategory::Treasury.bundle();
        assert_eq!(bundle.day_count, DayCountConvention::ActualActualBond);
        assert_eq!(bundle.frequency, Frequency::Semiannual);
        assert_eq!(bundle.settlement_days, 1);
    }

    #[test]
    fn test_bundles_are_distinct_per_keyword_category() {
        let categories = [
            BondCategory::Corporate,
            BondCategory::Municipal,
            BondCategory::Tech,
            BondCategory::Financial,
            BondCategory::Utility,
            BondCategory::HighYield,
            BondCategory::International,
        ];
        for (i, a) in categories.iter().enumerate() {
            for b in &categories[i + 1..] {
                assert_ne!(a.bundle(), b.bundle(), "{a} and {b} share a bundle");
            }
        }
    }

    #[test]
    fn test_utility_bundle() {
        let bundle = BondCategory::Utility.bundle();
        assert_eq!(bundle.day_count, DayCountConvention::Thirty360BondBasis);
        assert_eq!(bundle.frequency, Frequency::Annual);
        assert_ne!(bundle, BondCategory::Corporate.bundle());
        assert_eq!(
            BondCategory::classify("DUK 4.3 03/15/33"),
            Some(BondCategory::Utility)
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(BondCategory::classify("T 3 08/15/52"), Some(BondCategory::Treasury));
        assert_eq!(BondCategory::classify("AAPL 3.85 05/04/43"), Some(BondCategory::Tech));
        assert_eq!(BondCategory::classify("JPM 4.25 10/01/27"), Some(BondCategory::Financial));
        assert_eq!(
            BondCategory::classify("City of Chicago GO 5 01/01/40"),
            Some(BondCategory::Municipal)
        );
        assert_eq!(
            BondCategory::classify("Siemens, 2.5%, 15-Mar-2031 EUR"),
            Some(BondCategory::International)
        );
        assert_eq!(BondCategory::classify("XYZ 5 01/01/30"), None);
        assert_eq!(BondCategory::classify(""), None);
    }

    #[test]
    fn test_classify_does_not_match_inside_words() {
        // "GAS" must not fire on "LAS VEGAS".
        assert_eq!(BondCategory::classify("LAS VEGAS SANDS 3.9 08/08/29"), None);
    }

    #[test]
    fn test_generic_fallback() {
        let tsy = Isin::new("US912810TL26").unwrap();
        assert_eq!(BondCategory::generic(Some(&tsy), None), BondCategory::Treasury);

        let fnma = Isin::new("US3135G0K368").unwrap();
        assert_eq!(BondCategory::generic(Some(&fnma), None), BondCategory::Agency);

        let corp = Isin::new("US0378331005").unwrap();
        assert_eq!(BondCategory::generic(Some(&corp), None), BondCategory::Corporate);

        let bund = Isin::new("DE0001135481").unwrap();
        assert_eq!(BondCategory::generic(Some(&bund), None), BondCategory::International);

        assert_eq!(
            BondCategory::generic(None, Some("county water revenue")),
            BondCategory::Municipal
        );
    }

    #[test]
    fn test_international_bundle_localized() {
        let gilt = BondCategory::International.bundle_for(Some("GB"));
        assert_eq!(gilt.calendar, CalendarRegion::UnitedKingdom);
        assert_eq!(gilt.currency, Currency::GBP);
        let generic = BondCategory::International.bundle_for(None);
        assert_eq!(generic.calendar, CalendarRegion::Target);
    }
}
