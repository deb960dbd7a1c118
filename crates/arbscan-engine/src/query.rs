//! Read-side view of the current snapshot, optionally narrowed to a
//! selection of sources.

use std::collections::BTreeMap;

use arbscan_core::{
    InstrumentGroup, Opportunity, PriceRow, Selection, Snapshot, SnapshotMeta, SourceReport,
};
use serde::Serialize;

use crate::aggregator;
use crate::spread::{SpreadParams, rank};

/// What a caller sees for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub sequence: u64,
    pub generated_at_ms: u64,
    pub grouped_prices: BTreeMap<String, InstrumentGroup>,
    pub price_table: Vec<PriceRow>,
    pub opportunities: Vec<Opportunity>,
    pub sources: Vec<SourceReport>,
    pub meta: SnapshotMeta,
}

/// Answer a query from `snapshot`.
///
/// With no selection the snapshot is returned as published. With one, only
/// records from selected sources are kept and groups and opportunities are
/// recomputed from them; an empty selection yields an empty result.
pub fn query(
    snapshot: &Snapshot,
    selection: Option<&Selection>,
    params: &SpreadParams,
) -> QueryResponse {
    let Some(selection) = selection else {
        return QueryResponse {
            sequence: snapshot.sequence,
            generated_at_ms: snapshot.generated_at_ms,
            grouped_prices: snapshot.grouped_prices.clone(),
            price_table: snapshot.price_table(),
            opportunities: snapshot.opportunities.clone(),
            sources: snapshot.sources.clone(),
            meta: snapshot.meta.clone(),
        };
    };

    let records: Vec<_> = snapshot
        .records()
        .filter(|r| selection.contains(r.source))
        .cloned()
        .collect();
    let total_prices = records.len();
    let grouped_prices = aggregator::group(records);
    let (opportunities, total_opportunities) = rank(&grouped_prices, params);
    let sources: Vec<SourceReport> = snapshot
        .sources
        .iter()
        .filter(|r| selection.contains(r.source))
        .cloned()
        .collect();


    QueryResponse {
        sequence: snapshot.sequence,
        generated_at_ms: snapshot.generated_at_ms,
        price_table: grouped_prices.values().map(InstrumentGroup::price_row).collect(),
        grouped_prices,
        opportunities,
        meta: SnapshotMeta {
            total_opportunities,
            total_prices,
            sources_queried: sources.len(),
            processing_time_ms: snapshot.meta.processing_time_ms,
        },
        sources,
    }
}
