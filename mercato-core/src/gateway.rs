use async_trait::async_trait;

use crate::MercatoError;
use crate::types::{RawCandle, Timeframe};

/// Focused role trait for gateways that serve paginated OHLCV history.
#[async_trait]
pub trait OhlcvProvider: Send + Sync {
    /// Fetch one bounded chunk of candles for `symbol` at `timeframe`.
    ///
    /// `since` is the millisecond anchor: candles at or after this instant,
    /// or the earliest history the venue retains when `None`. The chunk is
    /// returned in upstream-native order; callers must not assume a
    /// direction. Chunk size is bounded by the venue, not by this trait.
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
    ) -> Result<Vec<RawCandle>, MercatoError>;

    /// REQUIRED: exact timeframes this gateway can natively serve.
    fn supported_timeframes(&self) -> &'static [Timeframe];
}

/// Focused role trait for gateways that list tradable markets.
#[async_trait]
pub trait MarketsProvider: Send + Sync {
    /// Fetch the venue's raw market records.
    ///
    /// Records are returned as unprocessed JSON; field extraction and its
    /// per-record failure policy live in [`crate::market`].
    async fn fetch_markets(&self) -> Result<Vec<serde_json::Value>, MercatoError>;
}

/// Capability-typed handle to one exchange venue.
///
/// Implementations advertise the roles they support by returning a usable
/// trait object from the corresponding `as_*_provider` accessor; the default
/// for every role is "unsupported".
pub trait ExchangeGateway: Send + Sync {
    /// A stable identifier for error tagging (e.g. "mercato-binance").
    fn name(&self) -> &'static str;

    /// Human-friendly venue string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Exchange-synchronized wall clock, whole seconds since the Unix epoch.
    ///
    /// The fetch loop derives its recency cutoff from this clock rather than
    /// the host clock so pagination agrees with the venue's notion of "now".
    fn seconds(&self) -> i64;

    /// Advertise OHLCV history capability.
    fn as_ohlcv_provider(&self) -> Option<&dyn OhlcvProvider> {
        None
    }

    /// Advertise market listing capability.
    fn as_markets_provider(&self) -> Option<&dyn MarketsProvider> {
        None
    }
}
