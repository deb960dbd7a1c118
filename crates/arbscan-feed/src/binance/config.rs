//! Binance-specific configuration extraction.

use arbscan_core::config::SourceConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// USDT pairs tracked when the config lists no symbols.
pub const DEFAULT_SYMBOLS: &[&str] =
    &["BTCUSDT", "ETHUSDT", "SOLUSDT", "AVAXUSDT", "LINKUSDT", "UNIUSDT", "ADAUSDT", "DOTUSDT"];

/// Parsed Binance configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub base_url: String,
    /// Native symbols kept from the full ticker list.
    pub symbols: Vec<String>,
}

impl BinanceConfig {
    pub fn from_source(cfg: &SourceConfig) -> Self {
        Self {
            base_url: cfg.effective_base_url(DEFAULT_BASE_URL),
            symbols: cfg.effective_symbols(DEFAULT_SYMBOLS),
        }

    }

    pub fn ticker_url(&self) -> String {
        format!("{}/api/v3/ticker/price", self.base_url)
    }
}
