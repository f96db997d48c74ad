//! # Yieldline Bonds
//!
//! From partial identification to a bond that can be valued.
//!
//! - **Identifiers**: ISIN validation and the caller's [`Identifier`](identifiers::Identifier)
//! - **Parser**: free-text descriptions with locale-aware day/month disambiguation
//! - **Conventions**: tiered resolver over reference stores, ticker statistics,
//!   parsed descriptions and category defaults
//! - **Schedule**: coupon dates rolled backward from maturity
//! - **Accrued**: accrued interest under the bond's day count
//!
//! ## Example
//!
//! ```rust
//! use yieldline_bonds::prelude::*;
//! use yieldline_core::Date;
//!
//! let resolver = ConventionResolver::new(Date::from_ymd(2025, 6, 30).unwrap());
//! let resolved = resolver
//!     .resolve_bond(&Identifier::from_description("T 3 15/08/52"), 71.66, None)
//!     .unwrap();
//!
//! assert_eq!(resolved.record.source, ConventionSource::ParsedDescription);
//! assert_eq!(resolved.definition.maturity, Date::from_ymd(2052, 8, 15).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod accrued;
pub mod conventions;
pub mod error;
pub mod identifiers;
pub mod parser;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrued::AccruedInterestCalculator;
    pub use crate::conventions::{
        Confidence, ConventionRecord, ConventionResolver, ConventionSource, ConventionStore,
        InMemoryConventionStore, ResolvedBond, TickerConventionTable,
    };
    pub use crate::error::{
        AccrualError, IdentifierError, InvalidDateError, ParseError, ResolutionError,
    };
    pub use crate::identifiers::{Identifier, Isin};
    pub use crate::parser::{DateFormat, DescriptionParser, ParsedDescription};
    pub use crate::schedule::{CouponPair, Schedule};
    pub use crate::types::{BondCategory, BondDefinition, BondTerms, SettlementContext};
}

pub use error::{AccrualError, InvalidDateError, ParseError, ResolutionError};
