//! Bond data model.

mod category;
mod definition;

pub use category::{BondCategory, ConventionBundle};
pub use definition::{BondDefinition, BondTerms, SettlementContext};
