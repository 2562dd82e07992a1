//! mercato-core
//!
//! Core types, traits, and utilities shared across the mercato ecosystem.
//!
//! - `types`: common data structures (timeframes, raw and normalized candles,
//!   per-symbol series, orchestrator configuration).
//! - `gateway`: the `ExchangeGateway` trait and capability role traits.
//! - `market`: market metadata extraction with a typed per-record skip policy.
//! - `timeseries`: helpers to merge fetched chunks and join symbols.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Gateway role traits are `async_trait` methods and the orchestrator crate
//! wraps them with `tokio::time::timeout`, so gateway implementations are
//! expected to run under a Tokio 1.x runtime.
#![warn(missing_docs)]

mod error;
/// Gateway capability traits and the primary `ExchangeGateway` interface.
pub mod gateway;
/// Market metadata extraction, filtering, and volume ranking.
pub mod market;
/// Time-series utilities for merging chunks and aligning symbols.
pub mod timeseries;
pub mod types;

pub use error::MercatoError;
pub use gateway::{ExchangeGateway, MarketsProvider, OhlcvProvider};
pub use market::{
    MarketFilter, MarketSummary, MarketsReport, extract_market, extract_markets, top_volume_ids,
};
pub use timeseries::align::{HistoryFrame, Ohlcv};
pub use timeseries::merge::{merge_candles, merge_chunks, normalize_oldest_first};
pub use types::{Candle, DownloadReport, MercatoConfig, RawCandle, Series, Timeframe};
