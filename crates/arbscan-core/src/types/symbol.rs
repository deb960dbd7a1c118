//! Canonical instrument symbols.
//!
//! Every source names instruments differently (`BTCUSDT`, `BTC_USDC_PERP`,
//! `PERP_BTC_USDC`, `bitcoin`). Per-source rules in the feed crate split the
//! native name into a base and a quote; this module turns that pair into the
//! one canonical form `BASE-QUOTE` shared by all sources.

/// Quote currency that all USD-equivalent quotes fold into.
pub const CANONICAL_QUOTE: &str = "USDT";

/// Separator between base and quote in a canonical symbol.
pub const SEPARATOR: char = '-';

/// Quotes treated as the same dollar for cross-source comparison.
const USD_EQUIVALENTS: &[&str] = &["USD", "USDT", "USDC", "USDE", "FDUSD", "BUSD"];

/// Non-dollar quotes that are kept as-is.
const OTHER_QUOTES: &[&str] = &["BTC", "ETH", "BNB", "SOL", "EUR"];

/// Fold a native quote currency into its canonical form.
///
/// Returns `None` for quotes the system does not compare across sources.
pub fn fold_quote(quote: &str) -> Option<&'static str> {
    let quote = quote.trim();
    if USD_EQUIVALENTS.iter().any(|q| q.eq_ignore_ascii_case(quote)) {
        return Some(CANONICAL_QUOTE);
    }
    OTHER_QUOTES.iter().copied().find(|q| q.eq_ignore_ascii_case(quote))
}

/// All quote suffixes a concatenated symbol (`BTCUSDT`) may end with, longest
/// first so that `FDUSD` wins over `USD`.
pub fn known_quotes() -> Vec<&'static str> {
    let mut all: Vec<&'static str> =
        USD_EQUIVALENTS.iter().chain(OTHER_QUOTES).copied().collect();

    all.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    all
}

/// Build a canonical symbol from a base asset and a native quote.
///
/// The base must be non-empty ASCII alphanumeric. Returns `None` when either
/// side cannot be reconciled.
pub fn canonical(base: &str, quote: &str) -> Option<String> {
    let base = base.trim();
    if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let quote = fold_quote(quote)?;
    Some(format!("{}{SEPARATOR}{quote}", base.to_ascii_uppercase()))
}
