//! Paradex perpetuals: `GET /v1/markets/summary?market=ALL`.

pub mod json_parser;

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

const DEFAULT_BASE_URL: &str = "https://api.prod.paradex.trade";

/// Build the Paradex source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let base_url = source_config.effective_base_url(DEFAULT_BASE_URL);

    Ok(SourceDef {
        exchange: Exchange::Paradex,
        request: SourceRequest::Get { url: format!("{base_url}/v1/markets/summary?market=ALL") },
        parser: Box::new(json_parser::parse_markets_summary),
        symbol_rule: SymbolRule::for_exchange(Exchange::Paradex),
    })
}
