//! CoinGecko coin-id table and configuration.
//!
//! CoinGecko has no trading symbols; its `simple/price` endpoint is keyed by
//! coin id. The table below maps those ids to base assets.

use std::sync::LazyLock;

use ahash::AHashMap;
use arbscan_core::config::SourceConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Coins requested when the config lists none.
pub const DEFAULT_COINS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "solana",
    "avalanche-2",
    "chainlink",
    "uniswap",
    "cardano",
    "polkadot",
];

const COINS: &[(&str, &str)] = &[
    ("bitcoin", "BTC"),
    ("ethereum", "ETH"),
    ("solana", "SOL"),
    ("avalanche-2", "AVAX"),
    ("chainlink", "LINK"),
    ("uniswap", "UNI"),
    ("cardano", "ADA"),
    ("polkadot", "DOT"),
    ("ripple", "XRP"),
    ("dogecoin", "DOGE"),
    ("binancecoin", "BNB"),
    ("litecoin", "LTC"),
    ("near", "NEAR"),
    ("aptos", "APT"),
    ("arbitrum", "ARB"),
    ("optimism", "OP"),
    ("sui", "SUI"),
    ("hyperliquid", "HYPE"),
    ("tron", "TRX"),
    ("cosmos", "ATOM"),
];

static COIN_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| COINS.iter().copied().collect());

/// Base asset for a CoinGecko coin id.
pub fn base_for_coin(coin_id: &str) -> Option<&'static str> {
    COIN_TABLE.get(coin_id).copied()
}

/// Parsed CoinGecko configuration.
#[derive(Debug, Clone)]
pub struct CoingeckoConfig {
    pub base_url: String,
    /// Coin ids to request; ids missing from the table are still requested
    /// but dropped by the normalizer.
    pub coins: Vec<String>,
}

impl CoingeckoConfig {
    pub fn from_source(cfg: &SourceConfig) -> Self {
        Self {
            base_url: cfg.effective_base_url(DEFAULT_BASE_URL),
            coins: cfg.effective_coins(DEFAULT_COINS),
        }

    }

    pub fn price_url(&self) -> String {
        format!("{}/simple/price?ids={}&vs_currencies=usd", self.base_url, self.coins.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbscan_core::Exchange;

    #[test]
    fn default_coins_are_all_mapped() {
        for coin in DEFAULT_COINS {
            assert!(base_for_coin(coin).is_some(), "{coin} unmapped");
        }
    }

    #[test]
    fn price_url() {
        let cfg = CoingeckoConfig::from_source(&SourceConfig {
            coins: Some(vec!["Bitcoin".into(), "ethereum".into()]),
            ..SourceConfig::for_exchange(Exchange::Coingecko)
        });
        assert_eq!(
            cfg.price_url(),
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd"
        );
    }
}
