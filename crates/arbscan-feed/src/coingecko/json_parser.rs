//! Parser for the CoinGecko `simple/price` payload.
//!
//! ```json
//! {"bitcoin": {"usd": 50000}, "ethereum": {"usd": 3000.12}}
//! ```

use anyhow::{Result, anyhow};
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::parse_body;

/// Parse the coin → `{usd: price}` map, sorted by coin id.
pub fn parse_simple_price(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let coins = v.as_object().ok_or_else(|| anyhow!("simple/price payload is not an object"))?;
    if let Some(code) = v.get("status").and_then(|s| s.get("error_code")) {
        return Err(anyhow!("coingecko error {code}: {}", v["status"]["error_message"]));
    }

    let mut quotes: Vec<RawQuote> = coins
        .iter()
        .map(|(coin, px)| RawQuote::new(coin.as_str(), RawPrice::from_json(px.get("usd"))))
        .collect();
    quotes.sort_by(|a, b| a.native_symbol.cmp(&b.native_symbol));
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prices() {
        let body = r#"{"ethereum": {"usd": 3000.12}, "bitcoin": {"usd": 50000}}"#;
        let quotes = parse_simple_price(body).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].native_symbol, "bitcoin");
        assert_eq!(quotes[0].price, RawPrice::Number(50000.0));
    }

    #[test]
    fn missing_usd_is_kept_as_missing() {
        let quotes = parse_simple_price(r#"{"bitcoin": {}}"#).unwrap();
        assert_eq!(quotes[0].price, RawPrice::Missing);
    }

    #[test]
    fn rate_limit_body_is_error() {
        let body = r#"{"status": {"error_code": 429, "error_message": "rate limited"}}"#;
        let err = parse_simple_price(body).unwrap_err();
        assert!(err.to_string().contains("429"));
    }
}
