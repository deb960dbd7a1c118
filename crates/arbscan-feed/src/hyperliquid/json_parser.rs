//! Parser for the Hyperliquid `allMids` payload.
//!
//! ```json
//! {"BTC": "50000.5", "ETH": "3000.1", "@107": "12.3", "PURR/USDC": "0.2"}
//! ```
//!
//! Keys are bare perp coins, `BASE/QUOTE` spot pairs, or `@<index>` spot ids
//! (left for the normalizer to drop).

use anyhow::{Result, anyhow};
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::parse_body;

/// Build the request body for the `info` endpoint.
pub fn build_all_mids_request() -> serde_json::Value {
    serde_json::json!({"type": "allMids"})
}

/// Parse the coin → mid price map. Output is sorted by coin so repeated
/// fetches of the same payload produce identical quotes.
pub fn parse_all_mids(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let mids = v.as_object().ok_or_else(|| anyhow!("allMids payload is not an object"))?;

    let mut quotes: Vec<RawQuote> = mids
        .iter()
        .map(|(coin, px)| RawQuote::new(coin.as_str(), RawPrice::from_json(Some(px))))
        .collect();
    quotes.sort_by(|a, b| a.native_symbol.cmp(&b.native_symbol));
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mids() {
        let body = r#"{"ETH": "3000.1", "BTC": "50000.5", "@107": "12.3"}"#;
        let quotes = parse_all_mids(body).unwrap();

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].native_symbol, "@107");
        assert_eq!(quotes[1].native_symbol, "BTC");
        assert_eq!(quotes[1].price, RawPrice::Text("50000.5".into()));
    }

    #[test]
    fn array_is_malformed() {
        assert!(parse_all_mids("[]").is_err());
    }

    #[test]
    fn request_body() {
        assert_eq!(build_all_mids_request()["type"], "allMids");
    }
}
