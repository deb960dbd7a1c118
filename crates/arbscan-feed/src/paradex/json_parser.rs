//! Parser for the Paradex `markets/summary` payload.
//!
//! ```json
//! {"results": [{"symbol": "BTC-USD-PERP", "mark_price": "50001.3", "last_traded_price": "50000"}]}
//! ```
//!
//! The summary also lists options (`BTC-USD-96000-C`); only perpetuals are kept.

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, first_present, parse_body};

pub fn parse_markets_summary(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    let rows = array_at(&v, &["results"])?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let symbol = row.get("symbol")?.as_str()?;
            symbol.ends_with("-PERP").then(|| {
                let price = first_present(row, &["mark_price", "last_traded_price"]);
                RawQuote::new(symbol, RawPrice::from_json(price))
            })

        })
        .collect())
}
