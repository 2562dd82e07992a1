//! Fetch orchestration: per-symbol history loops, bulk downloads, and market
//! listings, all driven through the configured gateway.

pub mod download;
mod history;
mod markets;
