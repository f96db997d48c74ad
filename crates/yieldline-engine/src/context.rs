//! Per-batch engine context.
//!
//! Holds the resolver and benchmark curve as immutable snapshots. Build one
//! per batch and drop it afterwards; refreshed reference data goes into the
//! next context, never into one a batch is running against.

use std::sync::Arc;

use yieldline_bonds::conventions::ConventionResolver;
use yieldline_core::Date;
use yieldline_curves::BenchmarkCurve;

use crate::config::EngineConfig;

/// Shared, read-only inputs of the per-bond pipeline.
#[derive(Clone)]
pub struct EngineContext {
    config: EngineConfig,
    trade_date: Date,
    resolver: ConventionResolver,
    curve: Option<Arc<dyn BenchmarkCurve>>,
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("trade_date", &self.trade_date)
            .field("resolver", &self.resolver)
            .field("curve", &self.curve.as_ref().map(|c| c.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl EngineContext {
    /// Creates a context with a default resolver and no benchmark curve.
    ///
    /// The trade date is `config.as_of`, or today.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let trade_date = config.as_of.unwrap_or_else(Date::today);
        Self {
            resolver: ConventionResolver::new(trade_date),
            trade_date,
            config,
            curve: None,
        }
    }

    /// Replaces the resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ConventionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the benchmark curve used for spreads.
    #[must_use]
    pub fn with_curve(mut self, curve: Arc<dyn BenchmarkCurve>) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Engine settings.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Trade date positions settle from.
    #[must_use]
    pub fn trade_date(&self) -> Date {
        self.trade_date
    }

    /// Convention resolver.
    #[must_use]
    pub fn resolver(&self) -> &ConventionResolver {
        &self.resolver
    }

    /// Benchmark curve, if any.
    #[must_use]
    pub fn curve(&self) -> Option<&dyn BenchmarkCurve> {
        self.curve.as_deref()
    }
}
