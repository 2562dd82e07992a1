use std::sync::Arc;

use mercato_core::types::MercatoConfig;
use mercato_core::{ExchangeGateway, MercatoError};

/// Orchestrator that drives history collection against one exchange gateway.
///
/// The gateway handle and configuration are fixed at build time; switching
/// venues means building a new `Mercato` rather than mutating a live one.
pub struct Mercato {
    pub(crate) gateway: Arc<dyn ExchangeGateway>,
    pub(crate) cfg: MercatoConfig,
}

impl std::fmt::Debug for Mercato {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mercato")
            .field("gateway", &self.gateway.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Mercato` orchestrator with custom configuration.
pub struct MercatoBuilder {
    gateway: Option<Arc<dyn ExchangeGateway>>,
    cfg: MercatoConfig,
}

impl Default for MercatoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MercatoBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no gateway; you must provide one via [`gateway`].
    /// - Defaults are conservative: 10s per-gateway-call timeout, no overall
    ///   request deadline.
    ///
    /// [`gateway`]: MercatoBuilder::gateway
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: None,
            cfg: MercatoConfig::default(),
        }
    }

    /// Set the exchange gateway to collect from.
    #[must_use]
    pub fn gateway(mut self, g: Arc<dyn ExchangeGateway>) -> Self {
        self.gateway = Some(g);
        self
    }

    /// Set the per-gateway-call timeout.
    ///
    /// Applied to every `fetch_ohlcv` and `fetch_markets` call; a slow venue
    /// surfaces as `GatewayTimeout` rather than hanging the fetch loop.
    #[must_use]
    pub const fn gateway_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.gateway_timeout = timeout;
        self
    }

    /// Set an overall deadline for multi-symbol downloads.
    ///
    /// Bounds total latency even when many symbols time out sequentially.
    /// When exceeded, the download returns `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Mercato` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no gateway has been provided via [`gateway`].
    ///
    /// [`gateway`]: MercatoBuilder::gateway
    pub fn build(self) -> Result<Mercato, MercatoError> {
        let gateway = self.gateway.ok_or_else(|| {
            MercatoError::InvalidArg("no gateway configured; set one via gateway(...)".to_string())
        })?;
        Ok(Mercato {
            gateway,
            cfg: self.cfg,
        })
    }
}

/// Scope a gateway error to the symbol whose fetch it aborted.
pub(crate) fn tag_symbol(symbol: &str, e: MercatoError) -> MercatoError {
    match e {
        MercatoError::Gateway {
            exchange,
            symbol: None,
            msg,
        } => MercatoError::Gateway {
            exchange,
            symbol: Some(symbol.to_string()),
            msg,
        },
        other => other,
    }
}

impl Mercato {
    /// Start building a new `Mercato` instance.
    ///
    /// Typical usage chains the gateway and timeouts, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let gateway = Arc::new(BinanceGateway::new_default());
    /// let mercato = mercato::Mercato::builder()
    ///     .gateway(gateway)
    ///     .gateway_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MercatoBuilder {
        MercatoBuilder::new()
    }

    /// The name of the configured gateway.
    #[must_use]
    pub fn gateway_name(&self) -> &'static str {
        self.gateway.name()
    }

    /// Wrap a gateway future with the per-call timeout and standardized
    /// timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mercato::core::gateway_call_with_timeout",
            skip(fut),
            fields(exchange = exchange, capability = capability),
        )
    )]
    pub(crate) async fn gateway_call_with_timeout<T, Fut>(
        exchange: &'static str,
        capability: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, MercatoError>
    where
        Fut: core::future::Future<Output = Result<T, MercatoError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(MercatoError::gateway_timeout(exchange, capability)))
    }
}
