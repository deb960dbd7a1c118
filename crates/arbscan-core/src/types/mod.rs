//! Core data types: exchange identifiers, canonical symbols, price records,
//! selections, and per-cycle snapshots.

pub mod enums;
pub mod market_data;
pub mod selection;
pub mod snapshot;
pub mod symbol;

pub use enums::*;
pub use market_data::*;
pub use selection::*;
pub use snapshot::*;
