//! # arbscan-core
//!
//! Core crate for the arbscan cross-exchange spread scanner, providing:
//!
//! - **Types** (`types`): exchange ids, canonical symbols, price records,
//!   selections, instrument groups, opportunities, snapshots
//! - **Configuration** (`config`): JSON config deserialization and validation
//! - **Error types** (`error`): domain-specific `ArbError` via thiserror
//! - **Time utilities** (`time_util`): wall-clock timestamps
//! - **Logging** (`logging`): tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod time_util;
pub mod types;

// Re-export types at crate root for convenience.
pub use error::ArbError;
pub use types::*;
