//! Snapshot assembly and the publisher handle.

use std::sync::Arc;

use arbscan_core::{Snapshot, SnapshotMeta, SourceReport};
use arbscan_feed::normalizer::normalize;
use arbscan_feed::orchestrator::FetchBatch;
use arc_swap::ArcSwap;

use crate::aggregator;
use crate::spread::{SpreadParams, rank};

/// Build a snapshot from one fan-out's results.
///
/// Pure: the same batch, parameters, sequence and timestamp always produce
/// the same snapshot.
pub fn build_snapshot(
    batch: &FetchBatch,
    params: &SpreadParams,
    sequence: u64,
    generated_at_ms: u64,
) -> Snapshot {
    let mut records = Vec::new();
    let mut sources = Vec::with_capacity(batch.fetches.len());

    for fetch in &batch.fetches {
        let normalized =
            normalize(fetch.exchange, &fetch.symbol_rule, &fetch.quotes, fetch.observed_at_ms);
        sources.push(SourceReport {
            source: fetch.exchange,
            status: fetch.status.clone(),
            raw_count: fetch.quotes.len(),
            record_count: normalized.records.len(),
            dropped_symbols: normalized.dropped_symbols,
            dropped_prices: normalized.dropped_prices,
            latency_ms: fetch.latency_ms,
        });
        records.extend(normalized.records);
    }

    let total_prices = records.len();
    let grouped_prices = aggregator::group(records);
    let (opportunities, total_opportunities) = rank(&grouped_prices, params);

    Snapshot {
        sequence,
        generated_at_ms,
        grouped_prices,
        opportunities,
        meta: SnapshotMeta {
            total_opportunities,
            total_prices,
            sources_queried: sources.len(),
            processing_time_ms: batch.elapsed_ms,
        },
        sources,
    }
}

/// Holder of the most recent snapshot.
///
/// `publish` swaps the whole snapshot in; readers get an `Arc` that stays
/// valid however many cycles complete after it.
pub struct SnapshotPublisher {
    current: ArcSwap<Snapshot>,
}

impl SnapshotPublisher {
    /// Starts out holding [`Snapshot::empty`].
    pub fn new() -> Self {
        Self { current: ArcSwap::from_pointee(Snapshot::empty()) }
    }

    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.current.store(Arc::clone(&snapshot));
        snapshot
    }

    /// The last published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Sequence number the next published snapshot should carry.
    pub fn next_sequence(&self) -> u64 {
        self.current.load().sequence + 1
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
