//! Spread calculation and opportunity ranking.

use std::collections::BTreeMap;

use arbscan_core::config::ScanConfig;
use arbscan_core::types::snapshot::spread_pct;
use arbscan_core::{InstrumentGroup, Opportunity};

/// Inclusion floor and truncation for ranked opportunities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadParams {
    /// Opportunities whose spread (percent) is below this are excluded.
    pub min_spread_pct: f64,
    pub top_n: usize,
}

impl SpreadParams {
    pub fn from_config(scan: &ScanConfig) -> Self {
        Self { min_spread_pct: scan.effective_min_spread_pct(), top_n: scan.effective_top_n() }
    }
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// Opportunity for one group, or `None` when fewer than two sources quote it.
///
/// Buy and sell sides always come from different sources.
pub fn evaluate(group: &InstrumentGroup) -> Option<Opportunity> {
    let (low, high) = group.cross_source_extremes()?;
    Some(Opportunity {
        instrument: group.instrument.clone(),
        low_source: low.source,
        high_source: high.source,
        low_price: low.price,
        high_price: high.price,
        spread_pct: spread_pct(low.price, high.price),
        absolute_diff: high.price - low.price,
    })
}

/// Rank every group's opportunity, spread descending then instrument
/// ascending, and keep the first `top_n`.
///
/// Also returns how many opportunities passed the floor before truncation.
pub fn rank(
    groups: &BTreeMap<String, InstrumentGroup>,
    params: &SpreadParams,
) -> (Vec<Opportunity>, usize) {
    let mut opportunities: Vec<Opportunity> = groups
        .values()
        .filter_map(evaluate)
        .filter(|o| o.spread_pct >= params.min_spread_pct)
        .collect();

    opportunities.sort_by(|a, b| {
        b.spread_pct
            .total_cmp(&a.spread_pct)
            .then_with(|| a.instrument.cmp(&b.instrument))
    });

    let total = opportunities.len();
    opportunities.truncate(params.top_n);
    (opportunities, total)
}
