use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MercatoError;
use crate::types::Series;

/// OHLCV cell values without the timestamp (the frame index carries it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
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

/// Multi-symbol history joined on a shared ascending timestamp index.
///
/// Column identity is `(symbol, field)`: each symbol owns one lane of
/// optional [`Ohlcv`] cells aligned with the index. A `None` cell means the
/// symbol has no candle at that instant, which is expected for venues with
/// different listing dates or outages, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryFrame {
    index: Vec<DateTime<Utc>>,
    symbols: Vec<String>,
    lanes: Vec<Vec<Option<Ohlcv>>>,
}

impl HistoryFrame {
    /// Full outer join of per-symbol series on their timestamp index.
    ///
    /// The resulting index is the ascending union of all input indexes; no
    /// timestamp unique to a subset of symbols is dropped. Input order is
    /// preserved in `symbols()` / `lanes`.
    ///
    /// # Errors
    /// Returns `Err(MercatoError::InvalidArg)` when `series` is empty or two
    /// inputs carry the same symbol.
    pub fn join(series: Vec<Series>) -> Result<Self, MercatoError> {
        if series.is_empty() {
            return Err(MercatoError::InvalidArg(
                "cannot join an empty list of series".into(),
            ));
        }
        let mut symbols: Vec<String> = Vec::with_capacity(series.len());
        for s in &series {
            if symbols.iter().any(|known| known == s.symbol()) {
                return Err(MercatoError::InvalidArg(format!(
                    "duplicate symbol '{}' in join input",
                    s.symbol()
                )));
            }
            symbols.push(s.symbol().to_string());
        }

        let index: Vec<DateTime<Utc>> = series
            .iter()
            .flat_map(|s| s.candles().iter().map(|c| c.ts))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let lanes = series
            .iter()
            .map(|s| {
                let mut lane: Vec<Option<Ohlcv>> = vec![None; index.len()];
                let mut cursor = 0usize;
                for c in s.candles() {
                    // Both the index and the series are ascending, so a single
                    // forward cursor aligns them in one pass.
                    while index[cursor] != c.ts {
                        cursor += 1;
                    }
                    lane[cursor] = Some(Ohlcv {
                        open: c.open,
                        high: c.high,
                        low: c.low,
                        close: c.close,
                        volume: c.volume,
                    });
                }
                lane
            })
            .collect();

        Ok(Self {
            index,
            symbols,
            lanes,
        })
    }

    /// The shared ascending timestamp index.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Symbols in join-input order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of rows in the frame.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the frame holds no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// One symbol's lane of cells, aligned with `index()`.
    #[must_use]
    pub fn lane(&self, symbol: &str) -> Option<&[Option<Ohlcv>]> {
        let i = self.symbols.iter().position(|s| s == symbol)?;
        Some(&self.lanes[i])
    }

    /// Cell lookup by `(symbol, timestamp)`.
    #[must_use]
    pub fn get(&self, symbol: &str, ts: DateTime<Utc>) -> Option<&Ohlcv> {
        let lane = self.lane(symbol)?;
        let row = self.index.binary_search(&ts).ok()?;
        lane[row].as_ref()
    }
}
