//! Mock exchange gateway for CI-safe examples and tests.
//!
//! `MockGateway` serves scripted OHLCV chunks and static market records under
//! a fixed clock, so fetch-loop behavior is fully deterministic. The special
//! symbols "FAIL" and "TIMEOUT" force a gateway error and a slow response.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mercato_core::gateway::{ExchangeGateway, MarketsProvider, OhlcvProvider};
use mercato_core::{MercatoError, RawCandle, Timeframe};
use serde_json::Value;

pub mod fixtures;

/// Mock gateway driven by per-symbol chunk scripts.
///
/// Each `fetch_ohlcv` call pops the next chunk from the symbol's script; an
/// exhausted or missing script yields an empty chunk, which a fetch loop
/// treats as end of history.
pub struct MockGateway {
    clock_seconds: i64,
    scripts: Mutex<HashMap<String, VecDeque<Vec<RawCandle>>>>,
    markets: Vec<Value>,
    ohlcv_calls: AtomicUsize,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Gateway preloaded with the default fixtures and clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock_seconds: fixtures::CLOCK_SECONDS,
            scripts: Mutex::new(fixtures::scripts()),
            markets: fixtures::market_records(),
            ohlcv_calls: AtomicUsize::new(0),
        }
    }

    /// Gateway with no scripts and no markets, for fully custom setups.
    #[must_use]
    pub fn empty(clock_seconds: i64) -> Self {
        Self {
            clock_seconds,
            scripts: Mutex::new(HashMap::new()),
            markets: Vec::new(),
            ohlcv_calls: AtomicUsize::new(0),
        }
    }

    /// Override the fixed gateway clock, seconds since epoch.
    #[must_use]
    pub const fn with_clock(mut self, seconds: i64) -> Self {
        self.clock_seconds = seconds;
        self
    }

    /// Replace the chunk script for one symbol.
    #[must_use]
    pub fn with_script(mut self, symbol: &str, chunks: Vec<Vec<RawCandle>>) -> Self {
        self.scripts
            .get_mut()
            .expect("script mutex poisoned")
            .insert(symbol.to_string(), chunks.into());
        self
    }

    /// Replace the raw market records served by `fetch_markets`.
    #[must_use]
    pub fn with_markets(mut self, records: Vec<Value>) -> Self {
        self.markets = records;
        self
    }

    /// Number of `fetch_ohlcv` calls served so far.
    #[must_use]
    pub fn ohlcv_calls(&self) -> usize {
        self.ohlcv_calls.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_timeout(symbol: &str, capability: &'static str) -> Result<(), MercatoError> {
        match symbol {
            "FAIL" => Err(MercatoError::gateway(
                "mercato-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough to trip a short orchestrator timeout, short
                // enough not to drag out tests that allow it.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl ExchangeGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mercato-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }
    fn seconds(&self) -> i64 {
        self.clock_seconds
    }

    fn as_ohlcv_provider(&self) -> Option<&dyn OhlcvProvider> {
        Some(self as &dyn OhlcvProvider)
    }
    fn as_markets_provider(&self) -> Option<&dyn MarketsProvider> {
        Some(self as &dyn MarketsProvider)
    }
}

#[async_trait]
impl OhlcvProvider for MockGateway {
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        _timeframe: Timeframe,
        _since: Option<i64>,
    ) -> Result<Vec<RawCandle>, MercatoError> {
        self.ohlcv_calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail_or_timeout(symbol, "ohlcv").await?;
        let mut scripts = self.scripts.lock().expect("script mutex poisoned");
        Ok(scripts
            .get_mut(symbol)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }

    fn supported_timeframes(&self) -> &'static [Timeframe] {
        const SUPPORTED: &[Timeframe] = &[Timeframe::M1, Timeframe::H1, Timeframe::D1];
        SUPPORTED
    }
}

#[async_trait]
impl MarketsProvider for MockGateway {
    async fn fetch_markets(&self) -> Result<Vec<Value>, MercatoError> {
        Ok(self.markets.clone())
    }
}
