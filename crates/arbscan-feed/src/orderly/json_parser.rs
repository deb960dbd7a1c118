//! Parser for the Orderly `public/futures` payload.
//!
//! ```json
//! {"success": true, "data": {"rows": [{"symbol": "PERP_BTC_USDC", "mark_price": 50005.1}]}}
//! ```

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, ensure_success, first_str, parse_body};

pub fn parse_futures(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    ensure_success(&v)?;
    let rows = array_at(&v, &["data", "rows"])?;

    Ok(rows
        .iter()
        .map(|row| {
            let symbol = first_str(row, &["symbol"]).unwrap_or_default();
            RawQuote::new(symbol, RawPrice::from_json(row.get("mark_price")))
        })

        .collect())
}
