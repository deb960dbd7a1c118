//! # arbscan-engine
//!
//! Turns a cycle's fetch results into a published snapshot and answers
//! queries against it.
//!
//! ## Flow
//!
//! ```text
//! FetchBatch ──► normalize ──► aggregator::group ──► spread::rank ──► Snapshot
//!                                                                      │
//!                          SnapshotPublisher (ArcSwap) ◄───────────────┘
//!                                   │
//!                                   └──► query::query(selection)
//! ```
//!
//! - [`cycle`]: one cycle end to end, plus the periodic driver
//! - [`snapshot`]: pure snapshot assembly and the publisher handle
//! - [`query`]: per-request filtering of the current snapshot

pub mod aggregator;
pub mod cycle;
pub mod query;
pub mod snapshot;
pub mod spread;

pub use cycle::{CycleDriver, CycleRunner};
pub use query::{QueryResponse, query};
pub use snapshot::{SnapshotPublisher, build_snapshot};
pub use spread::SpreadParams;
