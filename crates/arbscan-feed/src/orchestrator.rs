//! Concurrent fan-out over the selected sources.
//!
//! One future per source, each bounded by the per-source timeout and raced
//! against the cycle's cancellation token. Futures resolve to their own
//! [`SourceFetch`] value, so nothing is shared while they run.
//!
//! ```text
//! Selection ──► resolve ──► [fetch ⏱ timeout ✕ cancel] × N ──► join_all ──► FetchBatch
//! ```

use std::sync::Arc;
use std::time::Duration;

use arbscan_core::time_util::now_ms;
use arbscan_core::{ArbError, Exchange, RawQuote, Selection, SourceStatus};
use futures_util::future::join_all;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::SourceAdapter;
use crate::normalizer::SymbolRule;
use crate::registry::SourceRegistry;

/// One source's contribution to a cycle. `quotes` is empty for every status
/// other than [`SourceStatus::Ok`].
#[derive(Debug, Clone)]
pub struct SourceFetch {
    pub exchange: Exchange,
    pub symbol_rule: SymbolRule,
    pub quotes: Vec<RawQuote>,
    pub status: SourceStatus,
    pub latency_ms: u64,
    /// When the response arrived (or the attempt ended).
    pub observed_at_ms: u64,
}

/// Everything gathered by one fan-out.
#[derive(Debug, Clone, Default)]
pub struct FetchBatch {
    /// One entry per selected source, in exchange order.
    pub fetches: Vec<SourceFetch>,
    /// Wall time of the whole fan-out.
    pub elapsed_ms: u64,
}

impl FetchBatch {
    pub fn ok_count(&self) -> usize {
        self.fetches.iter().filter(|f| f.status.is_ok()).count()
    }
}

/// Fans a selection out over the registry's adapters.
pub struct FetchOrchestrator {
    registry: Arc<SourceRegistry>,
    timeout: Duration,
}

impl FetchOrchestrator {
    pub fn new(registry: Arc<SourceRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetch every selected source concurrently.
    ///
    /// Returns once each source has answered, failed, timed out, or been
    /// cancelled. Source failures never surface here; only a selection naming
    /// an unconfigured source is an error.
    pub async fn fetch_all(
        &self,
        selection: &Selection,
        cancel: &CancellationToken,
    ) -> Result<FetchBatch, ArbError> {
        let sources = self.registry.resolve(selection)?;
        if sources.is_empty() {
            return Ok(FetchBatch::default());
        }

        let start = Instant::now();
        let fetches = join_all(
            sources
                .into_iter()
                .map(|s| fetch_one(s.adapter.as_ref(), self.timeout, cancel)),
        )
        .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        debug!("fan-out over {} sources finished in {elapsed_ms}ms", fetches.len());
        Ok(FetchBatch { fetches, elapsed_ms })
    }
}

/// Run one adapter under the deadline and the cancellation token.
async fn fetch_one(
    adapter: &dyn SourceAdapter,
    timeout: Duration,
    cancel: &CancellationToken,
) -> SourceFetch {
    let exchange = adapter.exchange();
    let start = Instant::now();

    let (quotes, status) = tokio::select! {
        biased;
        _ = cancel.cancelled() => (Vec::new(), SourceStatus::Cancelled),
        res = tokio::time::timeout(timeout, adapter.fetch()) => match res {
            Ok(Ok(quotes)) => (quotes, SourceStatus::Ok),
            Ok(Err(e)) => {
                warn!("[{exchange}] fetch failed: {e}");
                let reason = match e {
                    ArbError::SourceUnavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                (Vec::new(), SourceStatus::Failed { reason })
            }
            Err(_) => {
                warn!("[{exchange}] no answer within {}ms", timeout.as_millis());
                (Vec::new(), SourceStatus::TimedOut)
            }
        },
    };

    SourceFetch {
        exchange,
        symbol_rule: adapter.symbol_rule(),
        quotes,
        status,
        latency_ms: start.elapsed().as_millis() as u64,
        observed_at_ms: now_ms(),
    }
}
