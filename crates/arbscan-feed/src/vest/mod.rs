//! Vest perpetuals: `GET /v2/ticker/latest`.

pub mod json_parser;

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

const DEFAULT_BASE_URL: &str = "https://serverprod.vest.exchange";

/// Build the Vest source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let base_url = source_config.effective_base_url(DEFAULT_BASE_URL);

    Ok(SourceDef {
        exchange: Exchange::Vest,
        request: SourceRequest::Get { url: format!("{base_url}/v2/ticker/latest") },
        parser: Box::new(json_parser::parse_latest_tickers),
        symbol_rule: SymbolRule::for_exchange(Exchange::Vest),
    })
}
