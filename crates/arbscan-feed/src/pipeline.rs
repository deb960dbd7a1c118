//! Generic REST price source.
//!
//! Provides [`GenericSource`], a data-driven implementation of
//! [`SourceAdapter`] that replaces per-exchange boilerplate. Each exchange
//! only needs to provide a `build(config) -> SourceDef` function describing
//! its request and payload parser; the generic source handles the HTTP round
//! trip, status checking, and error mapping.
//!
//! # Architecture
//!
//! ```text
//! SourceDef ──► GenericSource.fetch() ──► one HTTP request
//!                                     ──► status check
//!                                     ──► parser(body) ──► Vec<RawQuote>
//! ```

use anyhow::Result;
use arbscan_core::{ArbError, Exchange, RawQuote};
use async_trait::async_trait;
use tracing::debug;

use crate::SourceAdapter;
use crate::normalizer::SymbolRule;

// ---------------------------------------------------------------------------
// SourceDef: describes one exchange's price request
// ---------------------------------------------------------------------------

/// A payload parser: `response_body -> Vec<RawQuote>`.
///
/// Errors mean the payload was malformed; an empty vector means the source
/// answered but reported nothing.
pub type PayloadParser = Box<dyn Fn(&str) -> Result<Vec<RawQuote>> + Send + Sync>;

/// The single HTTP request a source needs per cycle.
#[derive(Debug, Clone)]
pub enum SourceRequest {
    Get { url: String },
    PostJson { url: String, body: serde_json::Value },
}

impl SourceRequest {
    pub fn url(&self) -> &str {
        match self {
            Self::Get { url } | Self::PostJson { url, .. } => url,
        }
    }
}

/// Everything needed to fetch and parse one exchange's price feed.
pub struct SourceDef {
    pub exchange: Exchange,
    pub request: SourceRequest,
    pub parser: PayloadParser,
    pub symbol_rule: SymbolRule,
}

// ---------------------------------------------------------------------------
// GenericSource: the adapter
// ---------------------------------------------------------------------------

/// Price source driven by a [`SourceDef`] descriptor.
pub struct GenericSource {
    def: SourceDef,
    http: reqwest::Client,
}

impl GenericSource {
    /// `http` is shared between all sources; its own timeout is a backstop
    /// behind the orchestrator's per-source deadline.
    pub fn new(def: SourceDef, http: reqwest::Client) -> Self {
        Self { def, http }
    }

    pub fn request(&self) -> &SourceRequest {
        &self.def.request
    }
}

#[async_trait]
impl SourceAdapter for GenericSource {
    fn exchange(&self) -> Exchange {
        self.def.exchange
    }

    fn symbol_rule(&self) -> SymbolRule {
        self.def.symbol_rule.clone()
    }

    async fn fetch(&self) -> Result<Vec<RawQuote>, ArbError> {
        let exchange = self.def.exchange;
        let request = match &self.def.request {
            SourceRequest::Get { url } => self.http.get(url),
            SourceRequest::PostJson { url, body } => self.http.post(url).json(body),
        };

        let resp = request.send().await.map_err(|e| ArbError::unavailable(exchange, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ArbError::unavailable(exchange, format!("HTTP {status}")));
        }

        let body = resp.text().await.map_err(|e| ArbError::unavailable(exchange, e))?;
        let quotes = (self.def.parser)(&body)
            .map_err(|e| ArbError::unavailable(exchange, format!("{e:#}")))?;

        debug!("[{exchange}] {} raw quotes from {}", quotes.len(), self.def.request.url());
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use arbscan_core::config::SourceConfig;
    use arbscan_core::{Selection, SourceStatus};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    use crate::orchestrator::FetchOrchestrator;
    use crate::registry::SourceRegistry;

    /// Answer one HTTP request on a local port with a canned response.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    fn vest_at(base_url: String) -> GenericSource {
        let cfg = SourceConfig {
            base_url: Some(base_url),
            ..SourceConfig::for_exchange(Exchange::Vest)
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        GenericSource::new(crate::vest::build(&cfg).unwrap(), http)
    }

    #[test]
    fn generic_source_wraps_definition() {
        let cfg = SourceConfig {
            base_url: Some("http://127.0.0.1:9/".into()),
            ..SourceConfig::for_exchange(Exchange::Hyperliquid)
        };
        let def = crate::hyperliquid::build(&cfg).unwrap();
        let source = GenericSource::new(def, reqwest::Client::new());

        assert_eq!(source.exchange(), Exchange::Hyperliquid);
        assert_eq!(source.symbol_rule(), SymbolRule::for_exchange(Exchange::Hyperliquid));
        match source.request() {
            SourceRequest::PostJson { url, body } => {
                assert_eq!(url, "http://127.0.0.1:9/info");
                assert_eq!(body["type"], "allMids");
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_source_is_unavailable() {
        let err = vest_at("http://127.0.0.1:9".into()).fetch().await.unwrap_err();
        assert!(matches!(err, ArbError::SourceUnavailable { exchange: Exchange::Vest, .. }));
    }

    const UNAVAILABLE: &str =
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const GARBAGE: &str =
        "HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot json!";

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let base = serve_once(UNAVAILABLE).await;
        let err = vest_at(base).fetch().await.unwrap_err();
        match err {
            ArbError::SourceUnavailable { exchange, reason } => {
                assert_eq!(exchange, Exchange::Vest);
                assert!(reason.starts_with("HTTP 503"), "reason: {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_unavailable() {
        let base = serve_once(GARBAGE).await;
        let err = vest_at(base).fetch().await.unwrap_err();
        assert!(matches!(err, ArbError::SourceUnavailable { exchange: Exchange::Vest, .. }));
    }

    #[tokio::test]
    async fn error_status_reports_failed_in_batch() {
        let base = serve_once(UNAVAILABLE).await;
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(vest_at(base)), true);
        let orch = FetchOrchestrator::new(Arc::new(registry), Duration::from_secs(5));

        let sel: Selection = [Exchange::Vest].into_iter().collect();
        let batch = orch.fetch_all(&sel, &CancellationToken::new()).await.unwrap();
        assert_eq!(batch.fetches.len(), 1);
        assert!(batch.fetches[0].quotes.is_empty());
        match &batch.fetches[0].status {
            SourceStatus::Failed { reason } => {
                assert!(reason.starts_with("HTTP 503"), "reason: {reason}")
            }

            other => panic!("unexpected status {other:?}"),
        }
    }
}
