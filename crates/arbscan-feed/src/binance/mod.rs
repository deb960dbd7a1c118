//! Binance spot: `GET /api/v3/ticker/price`.

pub mod config;
pub mod json_parser;

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use self::config::BinanceConfig;
use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

/// Build the Binance source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let cfg = BinanceConfig::from_source(source_config);
    let symbols = cfg.symbols.clone();

    Ok(SourceDef {
        exchange: Exchange::Binance,
        request: SourceRequest::Get { url: cfg.ticker_url() },
        parser: Box::new(move |text: &str| json_parser::parse_ticker_prices(text, &symbols)),
        symbol_rule: SymbolRule::for_exchange(Exchange::Binance),
    })
}
