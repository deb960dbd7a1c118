//! One fetch → normalize → aggregate → rank → publish cycle, and the periodic
//! driver that repeats it.

use std::sync::Arc;
use std::time::Duration;

use arbscan_core::time_util::now_ms;
use arbscan_core::{ArbError, Selection, Snapshot};
use arbscan_feed::orchestrator::FetchOrchestrator;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::snapshot::{SnapshotPublisher, build_snapshot};
use crate::spread::SpreadParams;

/// Runs single cycles against a publisher.
pub struct CycleRunner {
    orchestrator: FetchOrchestrator,
    publisher: Arc<SnapshotPublisher>,
    params: SpreadParams,
}

impl CycleRunner {
    pub fn new(
        orchestrator: FetchOrchestrator,
        publisher: Arc<SnapshotPublisher>,
        params: SpreadParams,
    ) -> Self {
        Self { orchestrator, publisher, params }
    }

    pub fn publisher(&self) -> &Arc<SnapshotPublisher> {
        &self.publisher
    }

    /// Fetch `selection`, build a snapshot and publish it.
    ///
    /// A cycle cut short by `cancel` publishes nothing and returns the
    /// snapshot that was already current.
    pub async fn run_once(
        &self,
        selection: &Selection,
        cancel: &CancellationToken,
    ) -> Result<Arc<Snapshot>, ArbError> {
        let batch = self.orchestrator.fetch_all(selection, cancel).await?;
        if cancel.is_cancelled() {
            info!("cycle cancelled, keeping snapshot #{}", self.publisher.current().sequence);
            return Ok(self.publisher.current());
        }

        let sequence = self.publisher.next_sequence();
        let snapshot = build_snapshot(&batch, &self.params, sequence, now_ms());
        info!(
            "cycle #{}: {}/{} sources ok, {} prices, {} instruments, {} opportunities in {}ms",
            snapshot.sequence,
            batch.ok_count(),
            batch.fetches.len(),
            snapshot.meta.total_prices,
            snapshot.grouped_prices.len(),
            snapshot.meta.total_opportunities,
            batch.elapsed_ms,
        );
        if let Some(best) = snapshot.opportunities.first() {
            info!("cycle #{} top: {best}", snapshot.sequence);
        }
        Ok(self.publisher.publish(snapshot))
    }
}

/// Repeats cycles on a fixed interval until cancelled.
///
/// Cycles run one after another in a single task. A tick that comes due
/// while a cycle is still running is skipped.
pub struct CycleDriver {
    runner: CycleRunner,
    interval: Duration,
    selection: watch::Receiver<Selection>,
}

impl CycleDriver {
    /// `selection` is read at the start of every cycle.
    pub fn new(
        runner: CycleRunner,
        interval: Duration,
        selection: watch::Receiver<Selection>,
    ) -> Self {
        Self { runner, interval, selection }
    }

    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("cycle driver started (interval={}ms)", self.interval.as_millis());

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let selection = self.selection.borrow().clone();
            if let Err(e) = self.runner.run_once(&selection, &cancel).await {
                warn!("cycle skipped: {e}");
            }
        }

        info!("cycle driver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbscan_core::{Exchange, RawPrice, RawQuote, SourceStatus};
    use arbscan_feed::SourceAdapter;
    use arbscan_feed::registry::SourceRegistry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        exchange: Exchange,
        quotes: Vec<(&'static str, f64)>,
        delay: Duration,
    }

    #[async_trait]
    impl SourceAdapter for FixedSource {
        fn exchange(&self) -> Exchange {
            self.exchange
        }

        async fn fetch(&self) -> Result<Vec<RawQuote>, ArbError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.quotes.iter().map(|(s, p)| RawQuote::new(*s, RawPrice::Number(*p))).collect())
        }
    }

    fn source(
        exchange: Exchange,
        quotes: Vec<(&'static str, f64)>,
        delay_ms: u64,
    ) -> Arc<dyn SourceAdapter> {
        Arc::new(FixedSource { exchange, quotes, delay: Duration::from_millis(delay_ms) })
    }

    fn runner(timeout_ms: u64) -> CycleRunner {
        let mut registry = SourceRegistry::new();
        registry.register(source(Exchange::Binance, vec![("BTCUSDT", 50000.0)], 10), true);
        registry.register(source(Exchange::Hyperliquid, vec![("BTC", 50600.0)], 20), true);
        registry.register(source(Exchange::Vest, vec![("BTC-PERP", 49000.0)], 60_000), true);
        let orchestrator =
            FetchOrchestrator::new(Arc::new(registry), Duration::from_millis(timeout_ms));
        CycleRunner::new(orchestrator, Arc::new(SnapshotPublisher::new()), SpreadParams::default())
    }

    fn select(ids: &[Exchange]) -> Selection {
        ids.iter().copied().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_source_does_not_block_cycle() {
        let runner = runner(1_000);
        let sel = select(&[Exchange::Binance, Exchange::Hyperliquid, Exchange::Vest]);
        let snap = runner.run_once(&sel, &CancellationToken::new()).await.unwrap();

        assert_eq!(snap.sequence, 1);
        assert_eq!(snap.opportunities.len(), 1);
        assert_eq!(snap.opportunities[0].low_source, Exchange::Binance);
        assert_eq!(snap.report(Exchange::Vest).unwrap().status, SourceStatus::TimedOut);
        assert!(snap.meta.processing_time_ms < 2_000);
        assert_eq!(runner.publisher().current().sequence, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_publishes_empty_snapshot() {
        let runner = runner(1_000);
        let snap = runner.run_once(&Selection::empty(), &CancellationToken::new()).await.unwrap();
        assert_eq!(snap.sequence, 1);
        assert!(snap.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_selection_publishes_nothing() {
        let runner = runner(1_000);
        let err = runner
            .run_once(&select(&[Exchange::Pacifica]), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_request_error());
        assert_eq!(runner.publisher().current().sequence, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_follows_selection_until_cancelled() {
        let runner = runner(1_000);
        let publisher = Arc::clone(runner.publisher());
        let (tx, rx) = watch::channel(select(&[Exchange::Binance]));
        let cancel = CancellationToken::new();

        let driver = CycleDriver::new(runner, Duration::from_secs(5), rx);
        let handle = tokio::spawn(driver.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(500)).await;
        let first = publisher.current();
        assert_eq!(first.sequence, 1);
        assert!(first.opportunities.is_empty());

        tx.send_replace(select(&[Exchange::Binance, Exchange::Hyperliquid]));
        tokio::time::sleep(Duration::from_secs(5)).await;
        let second = publisher.current();
        assert_eq!(second.sequence, 2);
        assert_eq!(second.opportunities.len(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[derive(Default)]
    struct SlowCounter {
        started: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    struct SlowSource {
        counter: Arc<SlowCounter>,
        delay: Duration,
    }

    #[async_trait]
    impl SourceAdapter for SlowSource {
        fn exchange(&self) -> Exchange {
            Exchange::Binance
        }

        async fn fetch(&self) -> Result<Vec<RawQuote>, ArbError> {
            self.counter.started.fetch_add(1, Ordering::SeqCst);
            let active = self.counter.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.counter.max_active.fetch_max(active, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.counter.active.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![RawQuote::new("BTCUSDT", RawPrice::Number(50000.0))])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycle_skips_ticks_instead_of_overlapping() {
        let counter = Arc::new(SlowCounter::default());
        let mut registry = SourceRegistry::new();
        registry.register(
            Arc::new(SlowSource {
                counter: Arc::clone(&counter),
                delay: Duration::from_millis(2_500),
            }),
            true,
        );
        let orchestrator = FetchOrchestrator::new(Arc::new(registry), Duration::from_secs(3));
        let publisher = Arc::new(SnapshotPublisher::new());
        let runner =
            CycleRunner::new(orchestrator, Arc::clone(&publisher), SpreadParams::default());


        let (_tx, rx) = watch::channel(select(&[Exchange::Binance]));
        let cancel = CancellationToken::new();
        let driver = CycleDriver::new(runner, Duration::from_secs(1), rx);
        let handle = tokio::spawn(driver.run(cancel.clone()));

        let mut seen = vec![publisher.current().sequence];
        for _ in 0..35 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let seq = publisher.current().sequence;
            let last = *seen.last().unwrap();
            assert!(seq == last || seq == last + 1, "sequence jumped from {last} to {seq}");
            if seq != last {
                seen.push(seq);
            }
        }
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(counter.max_active.load(Ordering::SeqCst), 1);
        let started = counter.started.load(Ordering::SeqCst);
        assert!((3..=4).contains(&started), "started {started} fetches");
        assert_eq!(publisher.current().sequence, 3);
    }
}
