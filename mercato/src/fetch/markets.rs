use mercato_core::{MarketFilter, MarketsReport, MercatoError, extract_markets, top_volume_ids};

use crate::Mercato;

impl Mercato {
    /// List the gateway's markets with extracted metadata.
    ///
    /// Behavior and trade-offs:
    /// - Every summary in one listing carries the same snapshot timestamp,
    ///   read from the gateway clock before the request.
    /// - Extraction is per record: a record missing a required field is
    ///   skipped (and reported in `skipped`) rather than failing the listing.
    /// - `filter` is applied after extraction, so a malformed record still
    ///   shows up in `skipped` even when the filter would have dropped it.
    ///
    /// # Errors
    /// Returns `Unsupported` when the gateway lacks market-listing
    /// capability, or `Gateway`/`GatewayTimeout` when the listing call
    /// itself fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mercato::fetch::markets",
            skip(self),
            fields(exchange = self.gateway.name()),
        )
    )]
    pub async fn markets(&self, filter: MarketFilter) -> Result<MarketsReport, MercatoError> {
        let provider = self
            .gateway
            .as_markets_provider()
            .ok_or_else(|| MercatoError::unsupported("markets"))?;

        let timestamp = self.gateway.seconds();
        let records = Self::gateway_call_with_timeout(
            self.gateway.name(),
            "markets",
            self.cfg.gateway_timeout,
            provider.fetch_markets(),
        )
        .await?;

        Ok(extract_markets(&records, timestamp, filter))
    }

    /// Ids of the `n` highest-volume markets passing `filter`, ranked by
    /// descending 24h USD volume.
    ///
    /// # Errors
    /// Propagates any error from [`markets`](Mercato::markets).
    pub async fn top_volumes(
        &self,
        n: usize,
        filter: MarketFilter,
    ) -> Result<Vec<String>, MercatoError> {
        let report = self.markets(filter).await?;
        Ok(top_volume_ids(&report.markets, n))
    }
}
