//! Price data flowing from the adapters into the aggregation pipeline.
//!
//! # Timestamp convention
//!
//! All timestamps are in **milliseconds since Unix epoch**.

use serde::{Deserialize, Serialize};

use super::enums::Exchange;

// ---------------------------------------------------------------------------
// Raw quotes (adapter output)
// ---------------------------------------------------------------------------

/// A price in the source's native representation.
///
/// Exchanges encode prices as JSON strings (`"50000.5"`), JSON numbers, or
/// omit them entirely. Coercion happens in the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPrice {
    Text(String),
    Number(f64),
    Missing,
}

impl RawPrice {
    /// Capture a JSON value without interpreting it.
    pub fn from_json(v: Option<&serde_json::Value>) -> Self {
        match v {
            Some(serde_json::Value::String(s)) => Self::Text(s.clone()),
            Some(serde_json::Value::Number(n)) => {
                n.as_f64().map(Self::Number).unwrap_or(Self::Missing)
            }

            _ => Self::Missing,
        }
    }
}

/// One entry of a source's price feed, before symbol or price reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    /// Instrument name as the source spells it (e.g. `BTC_USDC_PERP`).
    pub native_symbol: String,
    pub price: RawPrice,
}

impl RawQuote {
    pub fn new(native_symbol: impl Into<String>, price: RawPrice) -> Self {
        Self { native_symbol: native_symbol.into(), price }
    }
}

// ---------------------------------------------------------------------------
// Canonical price record
// ---------------------------------------------------------------------------

/// One quote from one source at one instant, in canonical form.
///
/// `price` is always positive and finite; the normalizer drops anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Canonical symbol, e.g. `BTC-USDT`.
    pub instrument: String,
    pub price: f64,
    pub source: Exchange,
    pub observed_at_ms: u64,
}

impl std::fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}={:.8}", self.instrument, self.source, self.price)
    }
}
