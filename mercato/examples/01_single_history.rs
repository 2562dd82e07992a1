use std::sync::Arc;

use mercato::{Mercato, Timeframe};
use mercato_mock::MockGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Surfaces fetch-loop spans when built with `--features tracing`.
    tracing_subscriber::fmt::init();

    // 1. Build the orchestrator over a deterministic mock gateway. Swap in a
    //    real gateway implementation to collect from a live venue.
    let gateway = Arc::new(MockGateway::new());
    let mercato = Mercato::builder().gateway(gateway).build()?;

    // 2. Fetch the full daily history for one symbol. The loop paginates
    //    under the hood until the venue's recency cutoff.
    let series = mercato.history("BTC/USD", Timeframe::D1, None).await?;

    println!(
        "Fetched {} candles of {} for {}:",
        series.len(),
        series.timeframe(),
        series.symbol()
    );
    for candle in series.candles() {
        println!(
            " - TS: {}, O: {:.2}, H: {:.2}, L: {:.2}, C: {:.2}, V: {:.2}",
            candle.ts.timestamp_millis(),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume
        );
    }

    Ok(())
}
