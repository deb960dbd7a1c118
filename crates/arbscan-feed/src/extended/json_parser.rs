//! Parser for the Extended `info/markets` payload.
//!
//! ```json
//! {"status": "OK", "data": [
//!   {"name": "BTC-USD", "marketStats": {"markPrice": "50002", "lastPrice": "50001"}}
//! ]}
//! ```

use anyhow::{Result, bail};
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, first_present, first_str, parse_body};

pub fn parse_markets(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    if let Some(status) = v.get("status").and_then(|s| s.as_str()) {
        if !status.eq_ignore_ascii_case("ok") {
            bail!("status {status}: {}", v.get("error").map(|e| e.to_string()).unwrap_or_default());
        }
    }
    let rows = array_at(&v, &["data"])?;

    Ok(rows
        .iter()
        .map(|row| {
            let price = row
                .get("marketStats")
                .and_then(|stats| first_present(stats, &["markPrice", "lastPrice"]));

            RawQuote::new(first_str(row, &["name"]).unwrap_or_default(), RawPrice::from_json(price))
        })
        .collect())
}
