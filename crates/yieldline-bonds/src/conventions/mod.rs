//! Convention records, stores, ticker statistics and the tiered resolver.

mod record;
mod resolver;
mod store;
mod ticker;

pub use record::{Confidence, ConventionRecord, ConventionSource};
pub use resolver::{ConventionResolver, ResolvedBond};
pub use store::{ConventionStore, InMemoryConventionStore, StoreMetadata, StoredConvention};
pub use ticker::{
    statistical_confidence, TickerConventionTable, TickerObservation, TickerStatistic,
};
