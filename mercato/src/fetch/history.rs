use chrono::{NaiveDate, NaiveTime};
use mercato_core::timeseries::merge::{merge_chunks, normalize_oldest_first};
use mercato_core::{HistoryFrame, MercatoError, RawCandle, Series, Timeframe};

use crate::Mercato;
use crate::core::tag_symbol;

/// Parse a strict `YYYY-MM-DD` start date into epoch milliseconds (UTC midnight).
pub(crate) fn parse_start(start: Option<&str>) -> Result<Option<i64>, MercatoError> {
    start
        .map(|s| {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| MercatoError::InvalidArg(format!("invalid start date '{s}': {e}")))?;
            Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
        })
        .transpose()
}

impl Mercato {
    /// Fetch the full OHLCV history for one symbol.
    ///
    /// Behavior and trade-offs:
    /// - Drives repeated bounded `fetch_ohlcv` calls, walking forward from
    ///   `start` (or the venue's earliest history when `None`) until the
    ///   recency cutoff is reached: `now − 24h` for daily/weekly candles,
    ///   `now − 1h` otherwise, with "now" taken from the gateway clock.
    /// - Overlapping timestamps across chunks are deduplicated first-wins;
    ///   the result is strictly ascending with one row per timestamp.
    /// - Gateway failures abort immediately with the symbol attached; there
    ///   is no retry and no partial-chunk salvage.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed `start` date (before any gateway
    /// call), `Unsupported` when the gateway lacks OHLCV capability or the
    /// timeframe, and `Gateway`/`GatewayTimeout` for upstream failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mercato::fetch::history",
            skip(self),
            fields(exchange = self.gateway.name(), symbol = symbol, timeframe = %timeframe),
        )
    )]
    pub async fn history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: Option<&str>,
    ) -> Result<Series, MercatoError> {
        let start_ms = parse_start(start)?;
        self.fetch_symbol_history(symbol, timeframe, start_ms).await
    }

    /// Fetch and join history for several symbols into one [`HistoryFrame`].
    ///
    /// Behavior and trade-offs:
    /// - Input is validated up front: an empty or duplicate-bearing symbol
    ///   list and a malformed start date fail before any gateway call.
    /// - Symbols are processed sequentially; each fetch loop completes before
    ///   the next begins, keeping gateway load at one in-flight request.
    /// - Strict failure policy: the first symbol whose fetch fails aborts the
    ///   whole request with that symbol identified in the error. Use
    ///   [`download`](Mercato::download) for the partial-results alternative.
    /// - The join is a full outer join on the timestamp index: rows unique to
    ///   a subset of symbols are kept, with the other symbols' cells unset.
    ///
    /// # Errors
    /// Returns `InvalidArg` for bad input, or the first per-symbol fetch
    /// error encountered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mercato::fetch::combined_history",
            skip(self, symbols),
            fields(exchange = self.gateway.name(), symbols = symbols.len(), timeframe = %timeframe),
        )
    )]
    pub async fn combined_history(
        &self,
        symbols: &[&str],
        timeframe: Timeframe,
        start: Option<&str>,
    ) -> Result<HistoryFrame, MercatoError> {
        if symbols.is_empty() {
            return Err(MercatoError::InvalidArg(
                "no symbols requested for combined history".into(),
            ));
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(MercatoError::InvalidArg(format!(
                    "duplicate symbol '{s}' in combined history request"
                )));
            }
        }
        let start_ms = parse_start(start)?;

        let mut collected: Vec<Series> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            collected.push(self.fetch_symbol_history(symbol, timeframe, start_ms).await?);
        }
        HistoryFrame::join(collected)
    }

    /// The per-symbol fetch loop: bounded chunk requests until the requested
    /// range is covered, then merge.
    ///
    /// The accumulator is local to this call, so concurrent or repeated
    /// invocations can never share state. The loop is iterative; depth is
    /// bounded by venue history length, not the call stack.
    pub(crate) async fn fetch_symbol_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_ms: Option<i64>,
    ) -> Result<Series, MercatoError> {
        let ohlcv = self
            .gateway
            .as_ohlcv_provider()
            .ok_or_else(|| MercatoError::unsupported("ohlcv"))?;
        if !ohlcv.supported_timeframes().contains(&timeframe) {
            return Err(MercatoError::InvalidArg(format!(
                "timeframe {timeframe} not supported by {}",
                self.gateway.name()
            )));
        }

        let lag = timeframe.closing_lag_ms();
        let mut chunks: Vec<Vec<RawCandle>> = Vec::new();
        let mut anchor = start_ms;

        loop {
            // The cutoff tracks the gateway clock so long-running loops do not
            // chase a stale notion of "now".
            let cutoff = self.gateway.seconds().saturating_mul(1_000) - lag;
            if let Some(a) = anchor
                && a >= cutoff
            {
                break;
            }

            let fut = ohlcv.fetch_ohlcv(symbol, timeframe, anchor);
            let mut chunk = Self::gateway_call_with_timeout(
                self.gateway.name(),
                "ohlcv",
                self.cfg.gateway_timeout,
                fut,
            )
            .await
            .map_err(|e| tag_symbol(symbol, e))?;

            if chunk.is_empty() {
                // Upstream has nothing at or after the anchor.
                break;
            }
            normalize_oldest_first(&mut chunk);
            let newest = chunk[chunk.len() - 1].ts;
            chunks.push(chunk);

            match anchor {
                Some(a) if newest <= a => {
                    // No forward progress; the venue keeps serving the same
                    // edge. Stop rather than spin.
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        symbol,
                        anchor = a,
                        newest,
                        "fetch loop stalled at history edge"
                    );
                    break;
                }
                _ => anchor = Some(newest),
            }
        }

        merge_chunks(symbol, timeframe, chunks)
    }
}
