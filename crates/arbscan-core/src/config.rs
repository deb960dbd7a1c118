//! Configuration parsing for the arbscan system.
//!
//! All settings come from a single JSON config file. The top-level structure
//! contains logging metadata, scan tuning, the optional HTTP listener, and a
//! `sources` array where each entry describes one exchange.
//!
//! # Example config
//!
//! ```json
//! {
//!   "app": { "module_name": "arbscan", "log_path": "/tmp/log" },
//!   "scan": { "interval_ms": 10000, "timeout_per_source_ms": 5000,
//!             "min_spread_pct": 0.01, "top_n": 20 },
//!   "server": { "listen": "127.0.0.1:8080" },
//!   "sources": [
//!     { "exchange": "binance", "enabled": true, "symbols": ["BTCUSDT", "ETHUSDT"] },
//!     { "exchange": "coingecko", "coins": ["bitcoin", "ethereum"] },
//!     { "exchange": "paradex", "enabled": false }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::ArbError;
use crate::types::Exchange;

/// Default time between two cycles.
pub const DEFAULT_INTERVAL_MS: u64 = 10_000;
/// Default bound on a single adapter call.
pub const DEFAULT_TIMEOUT_PER_SOURCE_MS: u64 = 5_000;
/// Default floor for opportunity inclusion, in percent.
pub const DEFAULT_MIN_SPREAD_PCT: f64 = 0.01;
/// Default number of opportunities kept after ranking.
pub const DEFAULT_TOP_N: usize = 20;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    pub app: Option<ModuleMeta>,

    /// Cycle tuning.
    #[serde(default)]
    pub scan: ScanConfig,

    /// HTTP query listener.
    pub server: Option<ServerConfig>,

    /// One entry per configured exchange. Empty means "all supported
    /// exchanges with their default enablement".
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// Module metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

/// Cycle tuning: interval, per-source timeout, spread floor, truncation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    /// How often a cycle runs (default: 10 000 ms).
    pub interval_ms: Option<u64>,

    /// Bound on one adapter's latency (default: 5 000 ms).
    pub timeout_per_source_ms: Option<u64>,

    /// Opportunities below this spread (percent) are excluded (default: 0.01).
    pub min_spread_pct: Option<f64>,

    /// Number of ranked opportunities kept (default: 20).
    pub top_n: Option<usize>,

    /// `User-Agent` header sent to every source.
    pub user_agent: Option<String>,
}

impl ScanConfig {
    pub fn effective_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS))
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_per_source_ms.unwrap_or(DEFAULT_TIMEOUT_PER_SOURCE_MS))
    }

    pub fn effective_min_spread_pct(&self) -> f64 {
        self.min_spread_pct.unwrap_or(DEFAULT_MIN_SPREAD_PCT)
    }

    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!("arbscan/", env!("CARGO_PKG_VERSION")).to_string())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address, e.g. `"127.0.0.1:8080"`.
    pub listen: String,
}

/// A single exchange configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Exchange identifier: `"binance"`, `"hyperliquid"`, `"coingecko"`, ...
    pub exchange: String,

    /// Whether cycles fetch this source when no explicit selection is given.
    pub enabled: Option<bool>,

    /// Override of the exchange's REST base URL.
    pub base_url: Option<String>,

    /// Native symbols to keep (Binance-style sources). Empty keeps the
    /// adapter's default whitelist.
    pub symbols: Option<Vec<String>>,

    /// CoinGecko coin ids to request.
    pub coins: Option<Vec<String>>,
}

impl SourceConfig {
    /// A config entry with every optional field unset.
    pub fn for_exchange(exchange: Exchange) -> Self {
        Self {
            exchange: exchange.id().to_string(),
            enabled: None,
            base_url: None,
            symbols: None,
            coins: None,
        }
    }

    /// Parsed exchange identifier.
    pub fn exchange_id(&self) -> Result<Exchange, ArbError> {
        self.exchange.parse().map_err(ArbError::Config)
    }

    /// Returns the effective enablement, falling back to the exchange default.
    pub fn is_enabled(&self) -> bool {
        match (self.enabled, self.exchange_id()) {
            (Some(enabled), _) => enabled,
            (None, Ok(exchange)) => exchange.enabled_by_default(),
            (None, Err(_)) => false,
        }
    }

    /// Returns the base URL override or the given default, without a trailing slash.
    pub fn effective_base_url(&self, default: &str) -> String {
        self.base_url.as_deref().unwrap_or(default).trim_end_matches('/').to_string()
    }

    /// Returns the configured symbol whitelist or the given default.
    pub fn effective_symbols(&self, default: &[&str]) -> Vec<String> {
        match &self.symbols {
            Some(symbols) if !symbols.is_empty() => {
                symbols.iter().map(|s| s.trim().to_ascii_uppercase()).collect()
            }
            _ => default.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the configured CoinGecko ids or the given default.
    pub fn effective_coins(&self, default: &[&str]) -> Vec<String> {
        match &self.coins {
            Some(coins) if !coins.is_empty() => {
                coins.iter().map(|s| s.trim().to_ascii_lowercase()).collect()
            }
            _ => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Returns the configured sources, or every supported exchange with its
    /// default settings when none are listed.
    pub fn effective_sources(&self) -> Vec<SourceConfig> {
        if self.sources.is_empty() {
            Exchange::ALL.into_iter().map(SourceConfig::for_exchange).collect()
        } else {
            self.sources.clone()
        }
    }

    /// Returns the module name used for the log file prefix.
    pub fn module_name(&self) -> String {
        self.app
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "arbscan".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.app.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Reject configurations that cannot drive a cycle.
    pub fn validate(&self) -> Result<(), ArbError> {
        let scan = &self.scan;
        if scan.interval_ms == Some(0) {
            return Err(ArbError::Config("scan.interval_ms must be > 0".into()));
        }
        if scan.timeout_per_source_ms == Some(0) {
            return Err(ArbError::Config("scan.timeout_per_source_ms must be > 0".into()));
        }
        if scan.top_n == Some(0) {
            return Err(ArbError::Config("scan.top_n must be > 0".into()));
        }
        if let Some(min) = scan.min_spread_pct {
            if !min.is_finite() || min < 0.0 {
                return Err(ArbError::Config(format!(
                    "scan.min_spread_pct must be a finite value >= 0, got {min}"
                )));
            }
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            let exchange = source.exchange_id()?;
            if !seen.insert(exchange) {
                return Err(ArbError::Config(format!("duplicate source entry '{exchange}'")));
            }
            if let Some(base_url) = &source.base_url {
                url::Url::parse(base_url).map_err(|e| {
                    ArbError::Config(format!("{exchange}: invalid base_url '{base_url}': {e}"))
                })?;
            }
        }
        Ok(())
    }
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate a JSON config string.
pub fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(content).context("parsing config JSON")?;
    config.validate()?;
    Ok(config)
}
