use std::collections::HashSet;

use mercato_core::{DownloadReport, HistoryFrame, MercatoError, Series, Timeframe};

use crate::Mercato;
use crate::fetch::history::parse_start;

/// Builder to orchestrate bulk history downloads for multiple symbols.
pub struct DownloadBuilder<'a> {
    pub(crate) mercato: &'a Mercato,
    pub(crate) symbols: Vec<String>,
    pub(crate) timeframe: Timeframe,
    // Parsed lazily in run(), so a bad date surfaces as an error, not a panic.
    pub(crate) start: Option<String>,
}

impl std::fmt::Debug for DownloadBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadBuilder")
            .field("mercato", &self.mercato)
            .field("symbols", &self.symbols)
            .field("timeframe", &self.timeframe)
            .field("start", &self.start)
            .finish()
    }
}

impl<'a> DownloadBuilder<'a> {
    /// Create a new builder bound to a `Mercato` instance.
    ///
    /// Behavior:
    /// - Starts with an empty symbol list and daily candles.
    /// - Defers start-date validation until `run()`.
    #[must_use]
    pub const fn new(mercato: &'a Mercato) -> Self {
        Self {
            mercato,
            symbols: Vec::new(),
            timeframe: Timeframe::D1,
            start: None,
        }
    }

    /// Replace the symbol list.
    ///
    /// Trade-offs: Replaces any previously added symbols; use `add_symbol`
    /// if you need to append.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the provided list contains duplicates.
    pub fn symbols(mut self, symbols: &[&str]) -> Result<Self, MercatoError> {
        let mut seen = HashSet::new();
        for s in symbols {
            if !seen.insert(*s) {
                return Err(MercatoError::InvalidArg(format!(
                    "duplicate symbol '{s}' in symbols list"
                )));
            }
        }
        self.symbols = symbols.iter().map(ToString::to_string).collect();
        Ok(self)
    }

    /// Add a single symbol to the list.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol already exists in the list.
    pub fn add_symbol(mut self, symbol: &str) -> Result<Self, MercatoError> {
        if self.symbols.iter().any(|existing| existing == symbol) {
            return Err(MercatoError::InvalidArg(format!(
                "duplicate symbol '{symbol}' already exists in symbols list"
            )));
        }
        self.symbols.push(symbol.to_string());
        Ok(self)
    }

    /// Select the candle timeframe.
    #[must_use]
    pub const fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Set the earliest date to collect from, as `YYYY-MM-DD`.
    ///
    /// Behavior: When unset, each symbol starts at the venue's earliest
    /// available history.
    #[must_use]
    pub fn start(mut self, date: &str) -> Self {
        self.start = Some(date.to_string());
        self
    }

    /// Execute the download and aggregate results.
    ///
    /// Behavior and trade-offs:
    /// - Fetches each symbol sequentially with the same loop and merge rules
    ///   as [`Mercato::history`], then outer-joins the successes into one
    ///   [`HistoryFrame`].
    /// - Partial failures populate `warnings` with symbol-tagged errors
    ///   without aborting the batch; `frame` is `None` only when every
    ///   symbol failed.
    /// - An optional request-level deadline bounds the whole batch; when it
    ///   elapses the download returns `RequestTimeout` with nothing salvaged.
    ///
    /// # Errors
    /// Returns an error only if no symbols are specified, the start date is
    /// malformed, or the request-level deadline elapses.
    pub async fn run(self) -> Result<DownloadReport, MercatoError> {
        if self.symbols.is_empty() {
            return Err(MercatoError::InvalidArg(
                "no symbols specified for download".into(),
            ));
        }
        let start_ms = parse_start(self.start.as_deref())?;

        let collect = async {
            let mut succeeded: Vec<Series> = Vec::new();
            let mut warnings: Vec<MercatoError> = Vec::new();
            for symbol in &self.symbols {
                match self
                    .mercato
                    .fetch_symbol_history(symbol, self.timeframe, start_ms)
                    .await
                {
                    Ok(series) => succeeded.push(series),
                    // Already symbol-tagged by the fetch loop.
                    Err(e) => warnings.push(e),
                }
            }
            (succeeded, warnings)
        };

        let (succeeded, warnings) = if let Some(deadline) = self.mercato.cfg.request_timeout {
            match tokio::time::timeout(deadline, collect).await {
                Ok(v) => v,
                Err(_) => return Err(MercatoError::request_timeout("download:history")),
            }
        } else {
            collect.await
        };

        let frame = if succeeded.is_empty() {
            None
        } else {
            Some(HistoryFrame::join(succeeded)?)
        };

        Ok(DownloadReport { frame, warnings })
    }
}

impl Mercato {
    /// Begin building a bulk download request.
    ///
    /// Typical usage: chain `symbols`/`timeframe`/`start` then call `run()`.
    #[must_use]
    pub const fn download(&'_ self) -> DownloadBuilder<'_> {
        DownloadBuilder::new(self)
    }
}
