//! Per-cycle results: instrument groups, arbitrage opportunities, and the
//! published snapshot that wraps them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::Exchange;
use super::market_data::PriceRecord;

// ---------------------------------------------------------------------------
// Instrument group
// ---------------------------------------------------------------------------

/// All records of one cycle that share a canonical instrument.
///
/// Records keep the order in which the aggregator saw them; that order is what
/// breaks ties between equal prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentGroup {
    pub instrument: String,
    pub records: Vec<PriceRecord>,
}

impl InstrumentGroup {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self { instrument: instrument.into(), records: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record holding the minimum price.
    pub fn lowest(&self) -> Option<&PriceRecord> {
        first_min(self.records.iter())
    }

    /// First record holding the maximum price.
    pub fn highest(&self) -> Option<&PriceRecord> {
        first_max(self.records.iter())
    }

    /// The `(buy, sell)` pair with the widest spread whose two records come
    /// from different sources. `None` when fewer than two sources quote the
    /// instrument.
    pub fn cross_source_extremes(&self) -> Option<(&PriceRecord, &PriceRecord)> {
        let low = self.lowest()?;
        let high = self.highest()?;
        if low.source != high.source {
            return Some((low, high));
        }

        let source = low.source;
        let sell = first_max(self.records.iter().filter(|r| r.source != source))?;
        let buy = first_min(self.records.iter().filter(|r| r.source != source))?;
        if spread_pct(low.price, sell.price) >= spread_pct(buy.price, high.price) {
            Some((low, sell))
        } else {
            Some((buy, high))
        }
    }

    /// Number of distinct sources quoting this instrument.
    pub fn source_count(&self) -> usize {
        let mut sources: Vec<Exchange> = self.records.iter().map(|r| r.source).collect();
        sources.sort();
        sources.dedup();
        sources.len()
    }

    /// One price per source for table display. When a source quoted the
    /// instrument more than once, its first quote is shown.
    pub fn price_row(&self) -> PriceRow {
        let mut prices = BTreeMap::new();
        for r in &self.records {
            prices.entry(r.source).or_insert(r.price);
        }
        let spread_pct = self
            .cross_source_extremes()
            .map(|(lo, hi)| spread_pct(lo.price, hi.price));
        PriceRow { instrument: self.instrument.clone(), prices, spread_pct }
    }
}

fn first_min<'a>(records: impl Iterator<Item = &'a PriceRecord>) -> Option<&'a PriceRecord> {
    records.fold(None, |best, r| match best {
        Some(b) if b.price <= r.price => Some(b),
        _ => Some(r),
    })
}

fn first_max<'a>(records: impl Iterator<Item = &'a PriceRecord>) -> Option<&'a PriceRecord> {
    records.fold(None, |best, r| match best {
        Some(b) if b.price >= r.price => Some(b),
        _ => Some(r),
    })
}

/// `(high - low) / low * 100`, the percentage gain relative to the buy side.
#[inline]
pub fn spread_pct(low: f64, high: f64) -> f64 {
    (high - low) / low * 100.0
}

/// One row of the cross-source price comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    pub instrument: String,
    pub prices: BTreeMap<Exchange, f64>,
    /// `None` when fewer than two sources quote the instrument.
    pub spread_pct: Option<f64>,
}

// ---------------------------------------------------------------------------
// Arbitrage opportunity
// ---------------------------------------------------------------------------

/// Read-only view over one instrument group with two or more quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub instrument: String,
    /// Where to buy.
    pub low_source: Exchange,
    /// Where to sell.
    pub high_source: Exchange,
    pub low_price: f64,
    pub high_price: f64,
    pub spread_pct: f64,
    pub absolute_diff: f64,
}

impl std::fmt::Display for Opportunity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} buy {}@{:.8} sell {}@{:.8} spread={:.4}%",
            self.instrument,
            self.low_source,
            self.low_price,
            self.high_source,
            self.high_price,
            self.spread_pct
        )
    }
}

// ---------------------------------------------------------------------------
// Per-source observability
// ---------------------------------------------------------------------------

/// How one source's fetch ended in a cycle.
///
/// Only for observability: every non-`Ok` status contributes zero records and
/// never fails the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SourceStatus {
    Ok,
    Failed { reason: String },
    TimedOut,
    Cancelled,
}

impl SourceStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Per-source summary of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
    pub source: Exchange,
    pub status: SourceStatus,
    /// Entries the adapter returned.
    pub raw_count: usize,
    /// Entries that survived normalization.
    pub record_count: usize,
    pub dropped_symbols: usize,
    pub dropped_prices: usize,
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Cycle metadata reported alongside the results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    /// Opportunities above the threshold before top-N truncation.
    pub total_opportunities: usize,
    /// Valid price records across all sources.
    pub total_prices: usize,
    pub sources_queried: usize,
    /// Wall time of the fetch fan-out.
    pub processing_time_ms: u64,
}

/// The immutable result of one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Monotonic cycle counter; `0` means no cycle has completed yet.
    pub sequence: u64,
    pub generated_at_ms: u64,
    pub grouped_prices: BTreeMap<String, InstrumentGroup>,
    pub opportunities: Vec<Opportunity>,
    pub sources: Vec<SourceReport>,
    pub meta: SnapshotMeta,
}

impl Snapshot {
    /// The placeholder published before the first cycle completes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.grouped_prices.is_empty() && self.opportunities.is_empty()
    }

    /// All records of the snapshot, in instrument order.
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.grouped_prices.values().flat_map(|g| g.records.iter())
    }

    pub fn price_table(&self) -> Vec<PriceRow> {
        self.grouped_prices.values().map(InstrumentGroup::price_row).collect()
    }

    pub fn report(&self, source: Exchange) -> Option<&SourceReport> {
        self.sources.iter().find(|r| r.source == source)
    }
}
