//! Aster perpetuals: Binance-compatible `GET /fapi/v1/ticker/price`.

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use crate::binance::config::DEFAULT_SYMBOLS;
use crate::binance::json_parser;
use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

const DEFAULT_BASE_URL: &str = "https://fapi.asterdex.com";

/// Build the Aster source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let base_url = source_config.effective_base_url(DEFAULT_BASE_URL);
    let symbols = source_config.effective_symbols(DEFAULT_SYMBOLS);

    Ok(SourceDef {
        exchange: Exchange::Aster,
        request: SourceRequest::Get { url: format!("{base_url}/fapi/v1/ticker/price") },
        parser: Box::new(move |text: &str| json_parser::parse_ticker_prices(text, &symbols)),
        symbol_rule: SymbolRule::for_exchange(Exchange::Aster),
    })
}
