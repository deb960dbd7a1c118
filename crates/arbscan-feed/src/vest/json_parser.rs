//! Parser for the Vest `ticker/latest` payload.
//!
//! ```json
//! {"tickers": [{"symbol": "BTC-PERP", "markPrice": "50003.5", "indexPrice": "50000"}]}
//! ```

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, first_str, parse_body};

pub fn parse_latest_tickers(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let rows = array_at(&v, &["tickers"])?;

    Ok(rows
        .iter()
        .map(|row| {
            let symbol = first_str(row, &["symbol"]).unwrap_or_default();
            RawQuote::new(symbol, RawPrice::from_json(row.get("markPrice")))
        })
        .collect())
}
