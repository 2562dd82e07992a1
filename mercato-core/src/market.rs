//! Market metadata extraction and filtering.
//!
//! Gateways hand back raw JSON market records; this module pulls the fields
//! the collector cares about into [`MarketSummary`]. Extraction is fallible
//! per record: a missing or unusable required field produces a typed
//! [`MercatoError::Extraction`] naming the record and field, and the caller
//! skips that record while keeping the rest of the listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MercatoError;

/// Extracted metadata for one tradable market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Venue-native market identifier (e.g. "BTC-PERP").
    pub id: String,
    /// Base asset code.
    pub base: String,
    /// Venue market type ("spot", "future", ...).
    pub kind: String,
    /// Whether this is a perpetual future.
    pub is_perp: bool,
    /// Order amount precision.
    pub amount_precision: f64,
    /// Price precision.
    pub price_precision: f64,
    /// Minimum order amount.
    pub min_amount: f64,
    /// Best bid at snapshot time.
    pub bid: f64,
    /// Best ask at snapshot time.
    pub ask: f64,
    /// Last traded price at snapshot time.
    pub price: f64,
    /// Price change over the last hour, fractional.
    pub change_1h: f64,
    /// Price change over the last 24 hours, fractional.
    pub change_24h: f64,
    /// Price change since beginning of day, fractional.
    pub change_bod: f64,
    /// USD volume traded over the last 24 hours.
    pub volume_usd_24h: f64,
    /// Gateway clock at listing time, seconds since epoch.
    pub timestamp: i64,
}

/// Market listing filter. `perps_only` takes precedence over `futures_only`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFilter {
    /// Keep only futures markets.
    pub futures_only: bool,
    /// Keep only perpetual futures.
    pub perps_only: bool,
}

impl MarketFilter {
    /// Whether a summary passes this filter.
    #[must_use]
    pub fn accepts(&self, market: &MarketSummary) -> bool {
        if self.perps_only {
            market.is_perp
        } else if self.futures_only {
            market.kind == "future"
        } else {
            true
        }
    }
}

/// Outcome of a market listing: extracted summaries plus the per-record
/// extraction failures that were skipped.
#[derive(Debug)]
pub struct MarketsReport {
    /// Successfully extracted markets, in venue order.
    pub markets: Vec<MarketSummary>,
    /// Extraction failures for skipped records.
    pub skipped: Vec<MercatoError>,
}

fn str_field<'a>(record: &'a Value, market: &str, field: &'static str) -> Result<&'a str, MercatoError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| MercatoError::extraction(market, field))
}

// Accepts JSON numbers and numeric strings; venues disagree on which they emit.
fn num_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn num_at(record: &Value, market: &str, path: &[&str], field: &'static str) -> Result<f64, MercatoError> {
    let mut cur = record;
    for key in path {
        cur = cur
            .get(key)
            .ok_or_else(|| MercatoError::extraction(market, field))?;
    }
    num_value(cur).ok_or_else(|| MercatoError::extraction(market, field))
}

/// Extract one raw market record into a [`MarketSummary`].
///
/// `timestamp` is the gateway clock at listing time and is stamped onto the
/// summary so a whole listing shares one snapshot instant.
///
/// # Errors
/// Returns `Err(MercatoError::Extraction)` naming the first required field
/// that is missing or unusable. The record id is reported as `"?"` when even
/// the id cannot be read.
pub fn extract_market(record: &Value, timestamp: i64) -> Result<MarketSummary, MercatoError> {
    let id = str_field(record, "?", "id")?.to_string();
    let base = str_field(record, &id, "base")?.to_string();
    let kind = str_field(record, &id, "type")?.to_string();
    let is_perp = id.contains("PERP") && kind == "future";

    Ok(MarketSummary {
        amount_precision: num_at(record, &id, &["precision", "amount"], "precision.amount")?,
        price_precision: num_at(record, &id, &["precision", "price"], "precision.price")?,
        min_amount: num_at(record, &id, &["limits", "amount", "min"], "limits.amount.min")?,
        bid: num_at(record, &id, &["info", "bid"], "info.bid")?,
        ask: num_at(record, &id, &["info", "ask"], "info.ask")?,
        price: num_at(record, &id, &["info", "price"], "info.price")?,
        change_1h: num_at(record, &id, &["info", "change1h"], "info.change1h")?,
        change_24h: num_at(record, &id, &["info", "change24h"], "info.change24h")?,
        change_bod: num_at(record, &id, &["info", "changeBod"], "info.changeBod")?,
        volume_usd_24h: num_at(record, &id, &["info", "volumeUsd24h"], "info.volumeUsd24h")?,
        id,
        base,
        kind,
        is_perp,
        timestamp,
    })
}

/// Extract a whole listing of raw records, applying `filter` and the
/// per-record skip policy.
///
/// Records that fail extraction are logged (when tracing is enabled) and
/// collected in [`MarketsReport::skipped`]; they never fail the listing.
/// The filter runs after extraction, so a malformed record is reported even
/// when the filter would have dropped it.
#[must_use]
pub fn extract_markets(records: &[Value], timestamp: i64, filter: MarketFilter) -> MarketsReport {
    let mut markets = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for record in records {
        match extract_market(record, timestamp) {
            Ok(summary) => {
                if filter.accepts(&summary) {
                    markets.push(summary);
                }
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "skipping unextractable market record");
                skipped.push(e);
            }
        }
    }
    MarketsReport { markets, skipped }
}

/// Rank markets by descending 24h USD volume and return up to `n` ids.
///
/// Ties and non-finite volumes keep venue order.
#[must_use]
pub fn top_volume_ids(markets: &[MarketSummary], n: usize) -> Vec<String> {
    let mut ranked: Vec<&MarketSummary> = markets.iter().collect();
    ranked.sort_by(|a, b| {
        b.volume_usd_24h
            .partial_cmp(&a.volume_usd_24h)
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(n).map(|m| m.id.clone()).collect()
}
