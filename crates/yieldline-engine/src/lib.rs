//! # Yieldline Engine
//!
//! Runs the bond pipeline for single requests and whole portfolios.
//!
//! - **Config**: [`EngineConfig`](config::EngineConfig), loadable from TOML
//! - **Context**: per-batch snapshot of the resolver and benchmark curve
//! - **Pipeline**: identifier and price in, [`AnalyticsResult`](pipeline::AnalyticsResult) out
//! - **Pool**: bounded worker pool with a batch deadline and ordered output
//! - **Portfolio**: per-position isolation and market-value weighted summary
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yieldline_bonds::identifiers::Identifier;
//! use yieldline_core::Date;
//! use yieldline_engine::prelude::*;
//!
//! let config = EngineConfig::default().with_as_of(Date::from_ymd(2025, 6, 27).unwrap());
//! let ctx = Arc::new(EngineContext::new(config));
//!
//! let report = analyze_portfolio(
//!     ctx,
//!     vec![PortfolioPosition::new(Identifier::from_description("T 3 15/08/52"), 71.66)],
//! )
//! .unwrap();
//! assert_eq!(report.summary.successful, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]

pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod pool;
pub mod portfolio;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::context::EngineContext;
    pub use crate::error::{ConfigError, EngineError, ErrorKind, ErrorRecord, PositionError};
    pub use crate::pipeline::{analyze_position, AnalyticsResult, PortfolioPosition};
    pub use crate::pool::{BatchOutcome, TaskFailure, WorkerPool};
    pub use crate::portfolio::{
        analyze_portfolio, effective_weights, PortfolioAnalytics, PortfolioReport,
        PositionOutcome,
    };
}

pub use error::{ConfigError, EngineError, ErrorKind, ErrorRecord, PositionError};
