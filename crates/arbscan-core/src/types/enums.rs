//! Enumerations used throughout the arbscan system.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Exchange identifiers
// ---------------------------------------------------------------------------

/// Supported price sources.
///
/// The set is fixed at compile time; configuration and selections refer to
/// these by their lowercase identifier (`"binance"`, `"hyperliquid"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Hyperliquid,
    Binance,
    Coingecko,
    Aster,
    Backpack,
    Orderly,
    Paradex,
    Extended,
    Vest,
    Pacifica,
}

impl Exchange {
    /// Every supported exchange, in display order.
    pub const ALL: [Exchange; 10] = [
        Self::Hyperliquid,
        Self::Binance,
        Self::Coingecko,
        Self::Aster,
        Self::Backpack,
        Self::Orderly,
        Self::Paradex,
        Self::Extended,
        Self::Vest,
        Self::Pacifica,
    ];

    /// Lowercase identifier used in config files and queries.
    pub fn id(self) -> &'static str {
        match self {
            Self::Hyperliquid => "hyperliquid",
            Self::Binance => "binance",
            Self::Coingecko => "coingecko",
            Self::Aster => "aster",
            Self::Backpack => "backpack",
            Self::Orderly => "orderly",
            Self::Paradex => "paradex",
            Self::Extended => "extended",
            Self::Vest => "vest",
            Self::Pacifica => "pacifica",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hyperliquid => "Hyperliquid",
            Self::Binance => "Binance",
            Self::Coingecko => "CoinGecko",
            Self::Aster => "Aster",
            Self::Backpack => "Backpack",
            Self::Orderly => "Orderly",
            Self::Paradex => "Paradex",
            Self::Extended => "Extended",
            Self::Vest => "Vest",
            Self::Pacifica => "Pacifica",
        }
    }

    /// Whether the source is enabled when the config does not say.
    pub fn enabled_by_default(self) -> bool {
        matches!(
            self,
            Self::Hyperliquid
                | Self::Binance
                | Self::Coingecko
                | Self::Aster
                | Self::Backpack
                | Self::Orderly

        )
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Exchange {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown exchange '{needle}'"))
    }
}
