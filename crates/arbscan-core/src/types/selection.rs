//! The set of sources a cycle fetches from or a query reads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::enums::Exchange;
use crate::error::ArbError;

/// An ordered, duplicate-free set of exchanges.
///
/// Passed explicitly into every cycle and query; an empty selection is valid
/// and yields an empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<Exchange>);

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse identifiers such as `["binance", "hyperliquid"]`.
    ///
    /// Blank entries are ignored. Any unknown identifier fails the whole
    /// selection with [`ArbError::InvalidSelection`].
    pub fn parse<I, S>(ids: I) -> Result<Self, ArbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for id in ids {
            let id = id.as_ref().trim();
            if id.is_empty() {
                continue;
            }
            let exchange = id.parse::<Exchange>().map_err(ArbError::InvalidSelection)?;
            set.insert(exchange);
        }
        Ok(Self(set))
    }

    /// Parse a comma-separated list (`"binance,aster"`), as used in query strings.
    pub fn parse_csv(csv: &str) -> Result<Self, ArbError> {
        Self::parse(csv.split(','))
    }

    pub fn contains(&self, exchange: Exchange) -> bool {
        self.0.contains(&exchange)
    }

    pub fn iter(&self) -> impl Iterator<Item = Exchange> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Exchange> for Selection {
    fn from_iter<T: IntoIterator<Item = Exchange>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(|e| e.id()).collect();
        f.write_str(&ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_csv_dedups_and_skips_blanks() {
        let sel = Selection::parse_csv("binance, hyperliquid,,binance").unwrap();
        assert_eq!(sel.len(), 2);
        assert!(sel.contains(Exchange::Binance));
        assert!(sel.contains(Exchange::Hyperliquid));
        assert_eq!(sel.to_string(), "hyperliquid,binance");
    }

    #[test]
    fn unknown_id_is_invalid_selection() {
        let err = Selection::parse_csv("binance,kraken").unwrap_err();
        assert!(matches!(err, ArbError::InvalidSelection(_)));
    }

    #[test]
    fn unsupported_venue_is_invalid_selection() {
        let err = Selection::parse_csv("binance,hibachi").unwrap_err();
        assert!(matches!(err, ArbError::InvalidSelection(ref id) if id.contains("hibachi")));
    }

    #[test]
    fn empty_csv_is_empty_selection() {

        assert!(Selection::parse_csv("").unwrap().is_empty());
    }
}
