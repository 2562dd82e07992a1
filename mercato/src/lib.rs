//! Mercato collects OHLCV history from crypto exchange gateways.
//!
//! Overview
//! - Drives a paginated fetch loop against gateways implementing the
//!   `mercato_core` contracts, walking forward in bounded chunks until the
//!   venue's recency cutoff.
//! - Merges overlapping chunks first-wins into strictly ascending per-symbol
//!   series, and outer-joins multiple symbols on a shared timestamp index.
//! - Lists market metadata with a per-record skip policy and ranks markets
//!   by 24h USD volume.
//! - Normalizes error handling and exposes uniform domain types from
//!   `mercato_core`.
//!
//! Key behaviors and trade-offs
//! - Failure policy:
//!   - `history` / `combined_history`: strict; the first gateway failure
//!     aborts with a symbol-tagged error.
//!   - `download()`: partial; failed symbols become warnings and the
//!     successes are still joined into a frame.
//! - Sequencing: symbols are fetched one after another, keeping gateway load
//!   at one in-flight request at the cost of total latency.
//! - Timeouts: every gateway call is bounded individually; bulk downloads
//!   accept an additional request-level deadline.
//!
//! Examples
//! Building an orchestrator and fetching one symbol:
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato::{Mercato, Timeframe};
//!
//! let gateway = Arc::new(FtxGateway::new_default());
//! let mercato = Mercato::builder().gateway(gateway).build()?;
//!
//! let series = mercato.history("BTC/USD", Timeframe::D1, Some("2021-01-01")).await?;
//! ```
//!
//! Bulk download helper (multi-symbol history):
//! ```rust,ignore
//! let report = mercato
//!     .download()
//!     .symbols(&["BTC/USD", "ETH/USD"])?
//!     .timeframe(mercato::Timeframe::H1)
//!     .start("2021-01-01")
//!     .run()
//!     .await?;
//! if let Some(frame) = report.frame.as_ref() {
//!     println!("{} rows across {} symbols", frame.len(), frame.symbols().len());
//! }
//! ```
//!
//! Ranking markets by volume:
//! ```rust,ignore
//! use mercato::MarketFilter;
//! let top = mercato
//!     .top_volumes(10, MarketFilter { perps_only: true, ..Default::default() })
//!     .await?;
//! ```
//!
//! See `mercato/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod fetch;

pub use core::{Mercato, MercatoBuilder};
pub use fetch::download::DownloadBuilder;

// Re-export core types for convenience
pub use mercato_core::{
    Candle,
    DownloadReport,
    ExchangeGateway,
    HistoryFrame,
    MarketFilter,
    MarketSummary,
    MarketsProvider,
    MarketsReport,
    MercatoConfig,
    MercatoError,
    Ohlcv,
    OhlcvProvider,
    RawCandle,
    Series,
    Timeframe,
};
