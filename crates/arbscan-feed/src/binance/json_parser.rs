//! Parser for the Binance-style `ticker/price` payload.
//!
//! ```json
//! [{"symbol": "BTCUSDT", "price": "50000.10"}, ...]
//! ```
//!
//! Shared by every venue that mirrors the Binance REST API (Aster).

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, parse_body};

/// Parse a ticker price list, keeping only symbols in `whitelist`.
///
/// An empty whitelist keeps everything.
pub fn parse_ticker_prices(text: &str, whitelist: &[String]) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let rows = array_at(&v, &[])?;

    let quotes = rows
        .iter()
        .filter_map(|row| {
            let symbol = row.get("symbol")?.as_str()?;
            if !whitelist.is_empty() && !whitelist.iter().any(|w| w.eq_ignore_ascii_case(symbol)) {
                return None;
            }
            Some(RawQuote::new(symbol, RawPrice::from_json(row.get("price"))))
        })
        .collect();

    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"symbol": "ETHBTC", "price": "0.05"},
        {"symbol": "BTCUSDT", "price": "50000.10"},
        {"symbol": "ETHUSDT", "price": "3000.5"},
        {"symbol": "DOGEUSDT", "price": "0.1"}
    ]"#;

    #[test]
    fn filters_by_whitelist() {
        let wl = vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()];
        let quotes = parse_ticker_prices(PAYLOAD, &wl).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].native_symbol, "BTCUSDT");
        assert_eq!(quotes[0].price, RawPrice::Text("50000.10".into()));
    }

    #[test]
    fn empty_whitelist_keeps_all() {
        assert_eq!(parse_ticker_prices(PAYLOAD, &[]).unwrap().len(), 4);
    }

    #[test]
    fn error_object_is_malformed() {
        assert!(parse_ticker_prices(r#"{"code": -1003, "msg": "banned"}"#, &[]).is_err());
    }
}
