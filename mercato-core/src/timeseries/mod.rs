//! Time-series utilities shared by gateways and the orchestrator.
//!
//! Modules include:
//! - `merge`: collapse an accumulator of fetched chunks into a clean series
//! - `align`: outer-join per-symbol series on the timestamp index

/// Join utilities for combining per-symbol series into one frame.
pub mod align;
/// Merge utilities for flattening, deduplicating, and ordering chunks.
pub mod merge;
