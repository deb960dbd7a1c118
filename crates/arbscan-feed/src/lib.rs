//! # arbscan-feed
//!
//! Price sources for multiple exchanges plus the concurrent fetch layer.
//!
//! ## Architecture
//!
//! Each exchange provides a `build(config) -> SourceDef` function that
//! describes its single REST request and its payload parser. The generic
//! [`pipeline::GenericSource`] turns that description into a
//! [`SourceAdapter`]; the [`registry`] maps config entries onto adapters and
//! the [`orchestrator`] fans a cycle's fetches out across them.
//!
//! ## Shared infrastructure
//!
//! - [`pipeline`]: `SourceDef` + `GenericSource` data-driven adapter
//! - [`normalizer`]: native symbol/price → canonical record
//! - [`orchestrator`]: bounded, cancellable concurrent fetch
//! - [`json_util`]: JSON parsing helpers

pub mod aster;
pub mod backpack;
pub mod binance;
pub mod coingecko;
pub mod extended;
pub mod hyperliquid;
pub mod json_util;
pub mod normalizer;
pub mod orchestrator;
pub mod orderly;
pub mod pacifica;
pub mod paradex;
pub mod pipeline;
pub mod registry;
pub mod vest;

use arbscan_core::{ArbError, Exchange, RawQuote};
use async_trait::async_trait;

use crate::normalizer::SymbolRule;

/// Trait implemented by every price source.
///
/// Adapters are shared across concurrent fetches, hence `Sync`. A call
/// performs one round trip and holds no state between cycles.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which exchange this adapter speaks for.
    fn exchange(&self) -> Exchange;

    /// How this source's native names map to canonical symbols.
    fn symbol_rule(&self) -> SymbolRule {
        SymbolRule::for_exchange(self.exchange())
    }

    /// Fetch the current price list.
    ///
    /// An empty vector is a valid answer; errors mean the source could not
    /// be reached or answered with something unparsable.
    async fn fetch(&self) -> Result<Vec<RawQuote>, ArbError>;
}
