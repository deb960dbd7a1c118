//! Hyperliquid: `POST /info {"type": "allMids"}`.

pub mod json_parser;

use anyhow::Result;
use arbscan_core::Exchange;
use arbscan_core::config::SourceConfig;

use crate::normalizer::SymbolRule;
use crate::pipeline::{SourceDef, SourceRequest};

const DEFAULT_BASE_URL: &str = "https://api.hyperliquid.xyz";

/// Build the Hyperliquid source definition from its config entry.
pub fn build(source_config: &SourceConfig) -> Result<SourceDef> {
    let base_url = source_config.effective_base_url(DEFAULT_BASE_URL);

    Ok(SourceDef {
        exchange: Exchange::Hyperliquid,
        request: SourceRequest::PostJson {
            url: format!("{base_url}/info"),
            body: json_parser::build_all_mids_request(),
        },
        parser: Box::new(json_parser::parse_all_mids),
        symbol_rule: SymbolRule::for_exchange(Exchange::Hyperliquid),
    })
}
