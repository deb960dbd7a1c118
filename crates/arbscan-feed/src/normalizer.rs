//! Raw quote → canonical price record conversion.
//!
//! Each source spells instruments its own way. A [`SymbolRule`] per source
//! turns the native name into the canonical `BASE-QUOTE` form:
//!
//! | Rule                       | Example native       | Canonical  |
//! |----------------------------|----------------------|------------|
//! | `Concatenated`             | `BTCUSDT`            | `BTC-USDT` |
//! | `Delimited('_')`           | `BTC_USDC_PERP`      | `BTC-USDT` |
//! | `Delimited('_')`           | `PERP_BTC_USDC`      | `BTC-USDT` |
//! | `Delimited('-')`           | `BTC-USD-PERP`       | `BTC-USDT` |
//! | `Delimited('-')` + implied | `BTC-PERP`           | `BTC-USDT` |
//! | `Delimited('/')` + implied | `BTC`                | `BTC-USDT` |
//! | `CoinTable`                | `bitcoin`            | `BTC-USDT` |
//!
//! Normalization is pure: the observation timestamp is an input, so identical
//! raw input always yields identical records.

use arbscan_core::symbol;
use arbscan_core::{Exchange, PriceRecord, RawPrice, RawQuote};

use crate::json_util::parse_text_f64;

/// Contract-type tags that carry no base/quote information.
const CONTRACT_TAGS: &[&str] = &["PERP", "SWAP", "PERPETUAL"];

/// How a source's native instrument names map to canonical symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRule {
    /// Base and quote glued together (`BTCUSDT`).
    Concatenated,
    /// Parts joined by `separator`; contract tags anywhere are dropped. When
    /// only the base remains, `implied_quote` supplies the quote.
    Delimited { separator: char, implied_quote: Option<&'static str> },
    /// Lowercase CoinGecko coin ids quoted in USD.
    CoinTable,
}

impl SymbolRule {
    /// The normalization rule each exchange's feed needs.
    pub fn for_exchange(exchange: Exchange) -> Self {
        match exchange {
            Exchange::Binance | Exchange::Aster => Self::Concatenated,
            Exchange::Coingecko => Self::CoinTable,
            Exchange::Hyperliquid | Exchange::Pacifica => {
                Self::Delimited { separator: '/', implied_quote: Some("USD") }
            }
            Exchange::Backpack | Exchange::Orderly => {
                Self::Delimited { separator: '_', implied_quote: None }
            }
            Exchange::Paradex | Exchange::Extended | Exchange::Vest => {
                Self::Delimited { separator: '-', implied_quote: Some("USD") }
            }
        }
    }

    /// Map a native instrument name to its canonical symbol.
    ///
    /// Returns `None` when the name cannot be reconciled.
    pub fn canonicalize(&self, native: &str) -> Option<String> {
        let native = native.trim();
        if native.is_empty() {
            return None;
        }
        match self {
            Self::Concatenated => {
                let upper = native.to_ascii_uppercase();
                symbol::known_quotes().into_iter().find_map(|q| {
                    let base = upper.strip_suffix(q)?;
                    symbol::canonical(base, q)
                })
            }
            Self::Delimited { separator, implied_quote } => {
                let parts: Vec<String> = native
                    .split(*separator)
                    .map(|p| p.trim().to_ascii_uppercase())
                    .filter(|p| !CONTRACT_TAGS.contains(&p.as_str()))
                    .collect();
                match parts.as_slice() {
                    [base, quote] => symbol::canonical(base, quote),
                    [base] => symbol::canonical(base, (*implied_quote)?),
                    _ => None,
                }
            }
            Self::CoinTable => {
                let base = crate::coingecko::config::base_for_coin(&native.to_ascii_lowercase())?;
                symbol::canonical(base, "USD")
            }
        }
    }
}

/// Coerce a native price into a positive finite number.
pub fn coerce_price(price: &RawPrice) -> Option<f64> {
    let value = match price {
        RawPrice::Text(s) => parse_text_f64(s)?,
        RawPrice::Number(n) => *n,
        RawPrice::Missing => return None,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Output of normalizing one source's raw entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub records: Vec<PriceRecord>,
    /// Entries whose instrument name could not be reconciled.
    pub dropped_symbols: usize,
    /// Entries whose price was missing, unparsable, or not positive.
    pub dropped_prices: usize,
}

/// Convert one source's raw entries into canonical price records.
///
/// Output order follows input order.
pub fn normalize(
    source: Exchange,
    rule: &SymbolRule,
    raw: &[RawQuote],
    observed_at_ms: u64,
) -> Normalized {
    let mut out = Normalized { records: Vec::with_capacity(raw.len()), ..Default::default() };

    for quote in raw {
        let Some(instrument) = rule.canonicalize(&quote.native_symbol) else {
            out.dropped_symbols += 1;
            continue;
        };
        let Some(price) = coerce_price(&quote.price) else {
            out.dropped_prices += 1;
            continue;
        };
        out.records.push(PriceRecord { instrument, price, source, observed_at_ms });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(e: Exchange) -> SymbolRule {
        SymbolRule::for_exchange(e)
    }

    #[test]
    fn concatenated_symbols() {
        let r = rule(Exchange::Binance);
        assert_eq!(r.canonicalize("BTCUSDT").as_deref(), Some("BTC-USDT"));
        assert_eq!(r.canonicalize("ethusdc").as_deref(), Some("ETH-USDT"));
        assert_eq!(r.canonicalize("BTCFDUSD").as_deref(), Some("BTC-USDT"));
        assert_eq!(r.canonicalize("ETHBTC").as_deref(), Some("ETH-BTC"));
        assert_eq!(r.canonicalize("USDT"), None);
        assert_eq!(r.canonicalize("FOOBAR"), None);
    }

    #[test]
    fn delimited_symbols() {
        let backpack = rule(Exchange::Backpack);
        assert_eq!(backpack.canonicalize("BTC_USDC_PERP").as_deref(), Some("BTC-USDT"));
        assert_eq!(backpack.canonicalize("SOL_USDC").as_deref(), Some("SOL-USDT"));
        assert_eq!(backpack.canonicalize("BTC"), None);

        let orderly = rule(Exchange::Orderly);
        assert_eq!(orderly.canonicalize("PERP_ETH_USDC").as_deref(), Some("ETH-USDT"));

        let paradex = rule(Exchange::Paradex);
        assert_eq!(paradex.canonicalize("BTC-USD-PERP").as_deref(), Some("BTC-USDT"));

        let vest = rule(Exchange::Vest);
        assert_eq!(vest.canonicalize("BTC-PERP").as_deref(), Some("BTC-USDT"));
        assert_eq!(vest.canonicalize("A-B-C-PERP"), None);
    }

    #[test]
    fn single_letter_base_is_not_a_tag() {
        let paradex = rule(Exchange::Paradex);
        assert_eq!(paradex.canonicalize("P-USD-PERP").as_deref(), Some("P-USDT"));
        assert_eq!(paradex.canonicalize("BTC-USD-100000-P"), None);

        let vest = rule(Exchange::Vest);
        assert_eq!(vest.canonicalize("P-PERP").as_deref(), Some("P-USDT"));

        let hl = rule(Exchange::Hyperliquid);
        assert_eq!(hl.canonicalize("P").as_deref(), Some("P-USDT"));
    }

    #[test]
    fn bare_coins_take_implied_quote() {
        let hl = rule(Exchange::Hyperliquid);
        assert_eq!(hl.canonicalize("BTC").as_deref(), Some("BTC-USDT"));
        assert_eq!(hl.canonicalize("PURR/USDC").as_deref(), Some("PURR-USDT"));
        assert_eq!(hl.canonicalize("@107"), None);
    }

    #[test]
    fn coin_table() {
        let cg = rule(Exchange::Coingecko);
        assert_eq!(cg.canonicalize("bitcoin").as_deref(), Some("BTC-USDT"));
        assert_eq!(cg.canonicalize("avalanche-2").as_deref(), Some("AVAX-USDT"));
        assert_eq!(cg.canonicalize("not-a-coin"), None);
    }

    #[test]
    fn price_coercion() {
        assert_eq!(coerce_price(&RawPrice::Text("50000.5".into())), Some(50000.5));
        assert_eq!(coerce_price(&RawPrice::Number(3.0)), Some(3.0));
        assert_eq!(coerce_price(&RawPrice::Text("0".into())), None);
        assert_eq!(coerce_price(&RawPrice::Number(-1.0)), None);
        assert_eq!(coerce_price(&RawPrice::Number(f64::NAN)), None);
        assert_eq!(coerce_price(&RawPrice::Number(f64::INFINITY)), None);
        assert_eq!(coerce_price(&RawPrice::Text("abc".into())), None);
        assert_eq!(coerce_price(&RawPrice::Missing), None);
    }

    #[test]
    fn normalize_counts_drops() {
        let raw = vec![
            RawQuote::new("BTCUSDT", RawPrice::Text("50000".into())),
            RawQuote::new("???", RawPrice::Text("1".into())),
            RawQuote::new("ETHUSDT", RawPrice::Missing),
            RawQuote::new("SOLUSDT", RawPrice::Number(150.0)),
        ];
        let out = normalize(Exchange::Binance, &rule(Exchange::Binance), &raw, 42);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.dropped_symbols, 1);
        assert_eq!(out.dropped_prices, 1);
        assert_eq!(out.records[0].instrument, "BTC-USDT");
        assert_eq!(out.records[0].source, Exchange::Binance);
        assert_eq!(out.records[0].observed_at_ms, 42);
        assert_eq!(out.records[1].instrument, "SOL-USDT");
    }

    #[test]
    fn normalize_is_deterministic() {
        let raw = vec![
            RawQuote::new("BTC_USDC_PERP", RawPrice::Text("50000".into())),
            RawQuote::new("ETH_USDC_PERP", RawPrice::Text("3000".into())),
        ];
        let r = rule(Exchange::Backpack);
        assert_eq!(
            normalize(Exchange::Backpack, &r, &raw, 7),
            normalize(Exchange::Backpack, &r, &raw, 7)
        );

    }
}
