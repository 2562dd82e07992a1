//! Foundational domain types shared across the mercato ecosystem.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// Candle interval granularity supported by the fetch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Timeframe {
    /// One minute.
    M1,
    /// Five minutes.
    M5,
    /// Fifteen minutes.
    M15,
    /// One hour.
    H1,
    /// Four hours.
    H4,
    /// One day.
    D1,
    /// One week.
    W1,
}

impl Timeframe {
    /// Stable identifier matching the upstream exchange vocabulary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::W1 => "1wk",
        }
    }

    /// Nominal candle duration in milliseconds.
    #[must_use]
    pub const fn step_ms(self) -> i64 {
        match self {
            Self::M1 => 60_000,
            Self::M5 => 300_000,
            Self::M15 => 900_000,
            Self::H1 => 3_600_000,
            Self::H4 => 14_400_000,
            Self::D1 => 86_400_000,
            Self::W1 => 604_800_000,
        }
    }

    /// Recency lag subtracted from the gateway clock before anchoring a fetch.
    ///
    /// Coarse timeframes get a full day of slack so a still-forming daily or
    /// weekly candle is never requested; finer timeframes get one hour.
    #[must_use]
    pub const fn closing_lag_ms(self) -> i64 {
        match self {
            Self::D1 | Self::W1 => 86_400_000,
            _ => 3_600_000,
        }
    }
}

impl core::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Self::M1),
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1d" => Ok(Self::D1),
            "1wk" => Ok(Self::W1),
            other => Err(MercatoError::InvalidArg(format!(
                "unsupported timeframe '{other}'"
            ))),
        }
    }
}

/// One OHLCV row as returned by an exchange gateway, prior to normalization.
///
/// Timestamps are integer milliseconds since the Unix epoch, matching the
/// upstream wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    /// Candle open time, milliseconds since epoch.
    pub ts: i64,
    /// Opening price.
    pub open: f64,
    /// Highest traded price in the interval.
    pub high: f64,
    /// Lowest traded price in the interval.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Base-asset volume traded in the interval.
    pub volume: f64,
}

impl RawCandle {
    /// Convenience constructor in wire order `[ts, o, h, l, c, v]`.
    #[must_use]
    pub const fn new(ts: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl From<Candle> for RawCandle {
    fn from(c: Candle) -> Self {
        Self {
            ts: c.ts.timestamp_millis(),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
        }
    }
}

/// One normalized OHLCV observation keyed by a calendar-aware instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time.
    pub ts: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest traded price in the interval.
    pub high: f64,
    /// Lowest traded price in the interval.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Base-asset volume traded in the interval.
    pub volume: f64,
}

impl Candle {
    /// Normalize a raw wire row into a calendar-keyed candle.
    ///
    /// # Errors
    /// Returns `Err(MercatoError::Data)` if the millisecond timestamp is not
    /// representable as a UTC instant.
    pub fn from_raw(raw: RawCandle) -> Result<Self, MercatoError> {
        let ts = DateTime::from_timestamp_millis(raw.ts)
            .ok_or_else(|| MercatoError::Data(format!("unrepresentable timestamp {}", raw.ts)))?;
        Ok(Self {
            ts,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        })
    }
}

/// A clean per-symbol history: strictly ascending timestamps, no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl Series {
    /// Build a series, validating the ordering invariant.
    ///
    /// # Errors
    /// Returns `Err(MercatoError::Data)` if timestamps are not strictly
    /// ascending (which also rules out duplicates).
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        candles: Vec<Candle>,
    ) -> Result<Self, MercatoError> {
        let symbol = symbol.into();
        for pair in candles.windows(2) {
            if pair[0].ts >= pair[1].ts {
                return Err(MercatoError::Data(format!(
                    "series for {symbol} is not strictly ascending at {}",
                    pair[1].ts
                )));
            }
        }
        Ok(Self {
            symbol,
            timeframe,
            candles,
        })
    }

    /// The symbol this series belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The candle granularity of this series.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// The candles, ascending by timestamp.
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Number of rows in the series.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candles.len()
    }

    /// Whether the series holds no candles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Look up the candle at an exact timestamp.
    #[must_use]
    pub fn get(&self, ts: DateTime<Utc>) -> Option<&Candle> {
        self.candles
            .binary_search_by_key(&ts, |c| c.ts)
            .ok()
            .map(|i| &self.candles[i])
    }

    /// Consume the series, returning its candles.
    #[must_use]
    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }
}

/// Global configuration for the `Mercato` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MercatoConfig {
    /// Timeout applied to every individual gateway call.
    pub gateway_timeout: Duration,
    /// Optional overall deadline for multi-symbol downloads.
    pub request_timeout: Option<Duration>,
}

impl Default for MercatoConfig {
    fn default() -> Self {
        Self {
            gateway_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Outcome of a bulk multi-symbol download.
///
/// Per-symbol failures do not abort the batch; they are collected in
/// `warnings` and the joined frame covers the symbols that succeeded.
#[derive(Debug)]
pub struct DownloadReport {
    /// The joined frame, present when at least one symbol succeeded.
    pub frame: Option<crate::timeseries::align::HistoryFrame>,
    /// Per-symbol failures encountered during the batch.
    pub warnings: Vec<MercatoError>,
}
