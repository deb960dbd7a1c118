//! Typed error definitions for the arbscan system.
//!
//! Provides [`ArbError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate seamlessly with `anyhow::Result`.

use thiserror::Error;

use crate::types::Exchange;

/// Domain-specific errors for the arbscan system.
#[derive(Debug, Error)]
pub enum ArbError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// A caller asked for a source identifier that is unknown or not
    /// configured. Surfaced to the caller as a request-level error.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Network, HTTP status, or payload failure in one source adapter.
    ///
    /// Recovered locally by the fetch orchestrator; never fails a cycle.
    #[error("{exchange} unavailable: {reason}")]
    SourceUnavailable { exchange: Exchange, reason: String },
}

impl ArbError {
    /// Shorthand for a [`ArbError::SourceUnavailable`] with a displayable reason.
    pub fn unavailable(exchange: Exchange, reason: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable { exchange, reason: reason.to_string() }
    }

    /// Whether this error must be reported back to the requester.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::InvalidSelection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_exchange() {
        let err = ArbError::unavailable(Exchange::Binance, "HTTP 503");
        assert_eq!(err.to_string(), "binance unavailable: HTTP 503");
        assert!(!err.is_request_error());
    }

    #[test]
    fn selection_is_request_error() {
        assert!(ArbError::InvalidSelection("foo".into()).is_request_error());
    }
}
