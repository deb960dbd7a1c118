//! Parser for the Backpack `tickers` payload.
//!
//! ```json
//! [{"symbol": "BTC_USDC_PERP", "lastPrice": "50010.2", "volume": "..."}, ...]
//! ```

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, parse_body};

/// Parse the ticker list, keeping perpetual markets only. Backpack lists
/// spot and perp books under the same base, and both would fold onto one
/// canonical instrument.
pub fn parse_tickers(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let rows = array_at(&v, &[])?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let symbol = row.get("symbol")?.as_str()?;
            symbol
                .ends_with("_PERP")
                .then(|| RawQuote::new(symbol, RawPrice::from_json(row.get("lastPrice"))))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_perps_only() {
        let body = r#"[
            {"symbol": "BTC_USDC", "lastPrice": "49990"},
            {"symbol": "BTC_USDC_PERP", "lastPrice": "50010.2"},
            {"symbol": "SOL_USDC_PERP", "lastPrice": null}
        ]"#;
        let quotes = parse_tickers(body).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].native_symbol, "BTC_USDC_PERP");
        assert_eq!(quotes[0].price, RawPrice::Text("50010.2".into()));
        assert_eq!(quotes[1].price, RawPrice::Missing);
    }

    #[test]
    fn object_is_malformed() {
        assert!(parse_tickers(r#"{"message": "nope"}"#).is_err());
    }
}
