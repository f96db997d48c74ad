//! # Yieldline Analytics
//!
//! Valuation of a resolved bond at one settlement date.
//!
//! - **Cash flows**: street-convention projection of the remaining flows
//! - **Yields**: clamped Newton-Raphson yield to maturity and price from yield
//! - **Risk**: Macaulay and modified duration, convexity, PVBP
//! - **Spreads**: Z-spread over a benchmark curve and the vanilla OAS approximation
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use yieldline_analytics::prelude::*;
//! use yieldline_bonds::prelude::*;
//! use yieldline_core::Date;
//!
//! let bond = BondDefinition::new(
//!     "CORP",
//!     dec!(0.05),
//!     Date::from_ymd(2030, 6, 15).unwrap(),
//!     BondCategory::Corporate.bundle(),
//! );
//! let settlement = Date::from_ymd(2025, 6, 15).unwrap();
//! let schedule = Schedule::generate(&bond, settlement).unwrap();
//! let flows = CashFlowProjection::project(&bond, &schedule, settlement).unwrap();
//!
//! let ytm = YieldSolver::default().solve(&flows, 100.0).unwrap().ytm;
//! let risk = RiskMetrics::compute(&flows, ytm).unwrap();
//! assert!((ytm - 0.05).abs() < 1e-6);
//! assert!(risk.modified_duration > 4.0 && risk.modified_duration < 4.5);
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
#![allow(clippy::similar_names)]

pub mod cashflows;
pub mod error;
pub mod risk;
pub mod spreads;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{CashFlow, CashFlowProjection};
    pub use crate::error::{AnalyticsError, AnalyticsResult, CalculationError, SolverError};
    pub use crate::risk::{effective_convexity, RiskMetrics, CONVEXITY_BUMP};
    pub use crate::spreads::{OasApproximation, ZSpreadCalculator, ZSpreadConfig};
    pub use crate::yields::{
        dirty_price, price_from_yield, PriceBreakdown, YieldSolution, YieldSolver,
        YieldSolverConfig,
    };
}

pub use error::{AnalyticsError, AnalyticsResult, CalculationError, SolverError};
