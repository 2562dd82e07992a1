use thiserror::Error;

/// Unified error type for the mercato workspace.
///
/// This wraps capability mismatches, argument validation errors,
/// gateway-tagged upstream failures, per-record extraction failures, and
/// timeout conditions.
#[derive(Debug, Error)]
pub enum MercatoError {
    /// The requested capability is not implemented by the configured gateway.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "ohlcv").
        capability: &'static str,
    },

    /// Issues with the returned or expected data (bad timestamps, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The upstream exchange call failed (network, auth, rate limit,
    /// malformed response). Carries the offending symbol when one is known.
    #[error("{exchange} failed{}: {msg}", .symbol.as_deref().map_or_else(String::new, |s| format!(" for {s}")))]
    Gateway {
        /// Gateway name that failed.
        exchange: String,
        /// Symbol whose fetch loop was aborted, if the failure is symbol-scoped.
        symbol: Option<String>,
        /// Human-readable error message.
        msg: String,
    },

    /// A market metadata record is missing or has an unusable required field.
    ///
    /// Listing skips the record and surfaces this error in the report; it is
    /// never fatal to the whole listing.
    #[error("market {market}: cannot extract field '{field}'")]
    Extraction {
        /// Identifier of the market record that failed extraction.
        market: String,
        /// Name of the required field that was missing or malformed.
        field: &'static str,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "history for BTC/USD".
        what: String,
    },

    /// An individual gateway call exceeded the configured timeout.
    #[error("gateway timed out: {capability} via {exchange}")]
    GatewayTimeout {
        /// Gateway name that timed out.
        exchange: String,
        /// Capability label (e.g. "ohlcv", "markets").
        capability: &'static str,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: &'static str,
    },
}

impl MercatoError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `Gateway` error without a symbol attribution.
    pub fn gateway(exchange: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Gateway {
            exchange: exchange.into(),
            symbol: None,
            msg: msg.into(),
        }
    }

    /// Helper: build a symbol-scoped `Gateway` error.
    pub fn gateway_for_symbol(
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Gateway {
            exchange: exchange.into(),
            symbol: Some(symbol.into()),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Extraction` error for a market record field.
    pub fn extraction(market: impl Into<String>, field: &'static str) -> Self {
        Self::Extraction {
            market: market.into(),
            field,
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `GatewayTimeout` error.
    pub fn gateway_timeout(exchange: impl Into<String>, capability: &'static str) -> Self {
        Self::GatewayTimeout {
            exchange: exchange.into(),
            capability,
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub const fn request_timeout(capability: &'static str) -> Self {
        Self::RequestTimeout { capability }
    }
}
