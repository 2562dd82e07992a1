use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Utc};

use crate::MercatoError;
use crate::types::{Candle, RawCandle, Series, Timeframe};

/// Collapse an accumulator of fetched chunks into a clean [`Series`].
///
/// - Chunks are flattened in accumulation order; within the flattened
///   sequence, candles are keyed by timestamp and the first appearance wins
///   on duplicates.
/// - The output is sorted ascending by timestamp regardless of accumulation
///   order, so the result is deterministic.
/// - Merging is a fixed point: feeding a merged series back through produces
///   the same series.
///
/// # Errors
/// Returns `Err(MercatoError::Data)` if any raw timestamp cannot be
/// represented as a UTC instant.
pub fn merge_chunks<I, C>(
    symbol: &str,
    timeframe: Timeframe,
    chunks: I,
) -> Result<Series, MercatoError>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = RawCandle>,
{
    let mut by_ts: BTreeMap<DateTime<Utc>, Candle> = BTreeMap::new();
    for chunk in chunks {
        for raw in chunk {
            let candle = Candle::from_raw(raw)?;
            match by_ts.entry(candle.ts) {
                Entry::Vacant(v) => {
                    v.insert(candle);
                }
                Entry::Occupied(_) => {}
            }
        }
    }
    Series::new(symbol, timeframe, by_ts.into_values().collect())
}

/// Merge already-normalized candle collections with first-wins semantics.
///
/// Used when re-merging series output or combining candles that skipped the
/// raw wire representation.
///
/// # Errors
/// Returns `Err(MercatoError::Data)` only through [`Series::new`] validation,
/// which cannot fire for `BTreeMap`-ordered output; the `Result` keeps the
/// signature uniform with [`merge_chunks`].
pub fn merge_candles<I, C>(
    symbol: &str,
    timeframe: Timeframe,
    series: I,
) -> Result<Series, MercatoError>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = Candle>,
{
    let mut by_ts: BTreeMap<DateTime<Utc>, Candle> = BTreeMap::new();
    for s in series {
        for candle in s {
            by_ts.entry(candle.ts).or_insert(candle);
        }
    }
    Series::new(symbol, timeframe, by_ts.into_values().collect())
}

/// Normalize one chunk to oldest-first order in place.
///
/// Upstream venues disagree on chunk direction; the fetch loop calls this
/// before appending to the accumulator so flatten order is chronological.
/// Detection compares the chunk's endpoints, so interior order is trusted.
pub fn normalize_oldest_first(chunk: &mut [RawCandle]) {
    if let (Some(first), Some(last)) = (chunk.first(), chunk.last())
        && first.ts > last.ts
    {
        chunk.reverse();
    }
}
