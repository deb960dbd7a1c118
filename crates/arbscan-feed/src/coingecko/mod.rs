//! CoinGecko reference prices: `GET /simple/price`.

pub mod config;
pub mod json_parser;

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use self::config::CoingeckoConfig;
use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

/// Build the CoinGecko source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let cfg = CoingeckoConfig::from_source(source_config);

    Ok(SourceDef {
        exchange: Exchange::Coingecko,
        request: SourceRequest::Get { url: cfg.price_url() },
        parser: Box::new(json_parser::parse_simple_price),
        symbol_rule: SymbolRule::for_exchange(Exchange::Coingecko),
    })
}
