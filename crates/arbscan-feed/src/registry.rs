//! Source registry: factory for creating adapters from config.

use std::sync::Arc;

use anyhow::{Context, Result};
use arbscan_core::config::{AppConfig, SourceConfig};
use arbscan_core::{ArbError, Exchange, Selection};
use tracing::info;

use crate::SourceAdapter;
use crate::pipeline::GenericSource;

/// Create a `SourceAdapter` based on the `exchange` field in the config.
///
/// Every supported exchange is a REST source; its module's `build()`
/// produces a `SourceDef` that is fed into [`GenericSource`].
pub fn create_source(
    config: &SourceConfig,
    http: &reqwest::Client,
) -> Result<Arc<dyn SourceAdapter>> {
    let exchange = config.exchange_id()?;

    let def = match exchange {
        Exchange::Hyperliquid => crate::hyperliquid::build(config)?,
        Exchange::Binance => crate::binance::build(config)?,
        Exchange::Coingecko => crate::coingecko::build(config)?,
        Exchange::Aster => crate::aster::build(config)?,
        Exchange::Backpack => crate::backpack::build(config)?,
        Exchange::Orderly => crate::orderly::build(config)?,
        Exchange::Paradex => crate::paradex::build(config)?,
        Exchange::Extended => crate::extended::build(config)?,
        Exchange::Vest => crate::vest::build(config)?,
        Exchange::Pacifica => crate::pacifica::build(config)?,
    };

    Ok(Arc::new(GenericSource::new(def, http.clone())))
}

/// A configured source as listed to callers.
#[derive(Clone)]
pub struct SourceDescriptor {
    pub exchange: Exchange,
    /// Part of the default selection.
    pub enabled: bool,
    pub adapter: Arc<dyn SourceAdapter>,
}

impl std::fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDescriptor")
            .field("exchange", &self.exchange)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// The set of sources a cycle may fetch, keyed by exchange.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the adapter for its exchange.
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>, enabled: bool) {
        let exchange = adapter.exchange();
        self.sources.retain(|s| s.exchange != exchange);
        self.sources.push(SourceDescriptor { exchange, enabled, adapter });
        self.sources.sort_by_key(|s| s.exchange);
    }

    /// Build every configured source, sharing one HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.scan.effective_timeout())
            .user_agent(config.scan.effective_user_agent())
            .build()
            .context("building HTTP client")?;

        let mut registry = Self::new();
        for source in config.effective_sources() {
            let adapter = create_source(&source, &http)
                .with_context(|| format!("source '{}'", source.exchange))?;
            let enabled = source.is_enabled();
            info!("[{}] registered (enabled={enabled})", adapter.exchange());
            registry.register(adapter, enabled);
        }
        Ok(registry)
    }

    pub fn get(&self, exchange: Exchange) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.exchange == exchange)
    }

    /// All configured sources, in exchange order.
    pub fn descriptors(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources fetched when the caller has not chosen.
    pub fn default_selection(&self) -> Selection {
        self.sources.iter().filter(|s| s.enabled).map(|s| s.exchange).collect()
    }

    /// Look up every selected source, failing on the first one that is not
    /// configured.
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<&SourceDescriptor>, ArbError> {
        selection
            .iter()
            .map(|exchange| {
                self.get(exchange).ok_or_else(|| {
                    ArbError::InvalidSelection(format!("source '{exchange}' is not configured"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> AppConfig {
        arbscan_core::config::parse_config(json).unwrap()
    }

    #[test]
    fn builds_every_exchange() {
        let registry = SourceRegistry::from_config(&config("{}")).unwrap();
        assert_eq!(registry.len(), Exchange::ALL.len());
        for exchange in Exchange::ALL {
            assert_eq!(registry.get(exchange).unwrap().adapter.exchange(), exchange);
        }
        let sel = registry.default_selection();
        assert!(sel.contains(Exchange::Orderly));
        assert!(!sel.contains(Exchange::Vest));
    }

    #[test]
    fn resolve_rejects_unconfigured() {
        let cfg = config(r#"{"sources": [{"exchange": "binance"}]}"#);
        let registry = SourceRegistry::from_config(&cfg).unwrap();

        let ok: Selection = [Exchange::Binance].into_iter().collect();
        assert_eq!(registry.resolve(&ok).unwrap().len(), 1);

        let bad: Selection = [Exchange::Binance, Exchange::Vest].into_iter().collect();
        let err = registry.resolve(&bad).unwrap_err();
        assert!(matches!(err, ArbError::InvalidSelection(_)));
        assert!(err.to_string().contains("vest"));
    }

    #[test]
    fn disabled_sources_stay_registered() {
        let registry = SourceRegistry::from_config(&config(
            r#"{"sources": [{"exchange": "binance"}, {"exchange": "paradex", "enabled": false}]}"#,
        ))
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_selection().len(), 1);
        assert!(registry.get(Exchange::Paradex).is_some());
    }
}
