//! Parser for the Pacifica `info/prices` payload.
//!
//! ```json
//! {"success": true, "data": [{"symbol": "BTC", "mark": "50004", "mid": "50003.5"}]}
//! ```

use anyhow::Result;
use arbscan_core::{RawPrice, RawQuote};

use crate::json_util::{array_at, ensure_success, first_present, first_str, parse_body};

pub fn parse_prices(text: &str) -> Result<Vec<RawQuote>> {
    let v = parse_body(text)?;
    ensure_success(&v)?;
    let rows = array_at(&v, &["data"])?;

    Ok(rows
        .iter()
        .map(|row| {
            RawQuote::new(
                first_str(row, &["symbol"]).unwrap_or_default(),
                RawPrice::from_json(first_present(row, &["mark", "mid"])),
            )
        })
        .collect())
}
