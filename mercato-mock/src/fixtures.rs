//! Deterministic fixture data for the mock gateway.
//!
//! The default clock and chunk timestamps are chosen so a daily-candle fetch
//! loop against "BTC/USD" terminates after exactly two gateway calls: the
//! recency cutoff sits at `CLOCK_SECONDS * 1000 - 24h = 2000` ms, the first
//! chunk ends at 1000 ms and the second at 2000 ms.

use std::collections::{HashMap, VecDeque};

use mercato_core::RawCandle;
use serde_json::{Value, json};

/// Fixed gateway clock, seconds since epoch.
pub const CLOCK_SECONDS: i64 = 86_402;

/// Two-call script for "BTC/USD".
///
/// The second chunk arrives newest-first and repeats the 1000 ms timestamp
/// with implausible values, so callers can verify both chunk normalization
/// and first-wins dedup.
#[must_use]
pub fn btc_chunks() -> Vec<Vec<RawCandle>> {
    vec![
        vec![RawCandle::new(1_000, 100.0, 110.0, 95.0, 105.0, 10.0)],
        vec![
            RawCandle::new(2_000, 105.0, 120.0, 100.0, 115.0, 12.0),
            RawCandle::new(1_000, 999.0, 999.0, 999.0, 999.0, 999.0),
        ],
    ]
}

/// One-chunk script for "ETH/USD", timestamps disjoint from "BTC/USD".
#[must_use]
pub fn eth_chunks() -> Vec<Vec<RawCandle>> {
    vec![vec![
        RawCandle::new(500, 10.0, 11.0, 9.0, 10.5, 100.0),
        RawCandle::new(1_500, 10.5, 12.0, 10.0, 11.5, 120.0),
    ]]
}

/// Raw market records in the venue's JSON shape, including one record with a
/// missing `info` block to exercise the extraction skip policy.
#[must_use]
pub fn market_records() -> Vec<Value> {
    vec![
        market("BTC/USD", "BTC", "spot", 50.0),
        market("BTC-PERP", "BTC", "future", 200.0),
        market("DOGE-0326", "DOGE", "future", 10.0),
        json!({
            "id": "BROKEN-PERP",
            "base": "BROKEN",
            "type": "future",
            "precision": { "amount": 0.001, "price": 0.5 },
            "limits": { "amount": { "min": 0.001 } },
        }),
    ]
}

fn market(id: &str, base: &str, kind: &str, volume_usd_24h: f64) -> Value {
    json!({
        "id": id,
        "base": base,
        "type": kind,
        "precision": { "amount": 0.0001, "price": 1.0 },
        "limits": { "amount": { "min": 0.0001 } },
        "info": {
            "bid": 41999.0,
            "ask": 42001.0,
            "price": 42000.0,
            "change1h": 0.001,
            "change24h": "0.025",
            "changeBod": -0.002,
            "volumeUsd24h": volume_usd_24h,
        },
    })
}

pub(crate) fn scripts() -> HashMap<String, VecDeque<Vec<RawCandle>>> {
    let mut m = HashMap::new();
    m.insert("BTC/USD".to_string(), btc_chunks().into());
    m.insert("ETH/USD".to_string(), eth_chunks().into());
    m
}
