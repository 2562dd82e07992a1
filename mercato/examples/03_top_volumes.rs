use std::sync::Arc;

use mercato::{MarketFilter, Mercato};
use mercato_mock::MockGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = Arc::new(MockGateway::new());
    let mercato = Mercato::builder().gateway(gateway).build()?;

    // List every market the venue serves. Records the gateway cannot extract
    // are skipped and reported, never fatal.
    let report = mercato.markets(MarketFilter::default()).await?;
    println!("{} markets listed:", report.markets.len());
    for market in &report.markets {
        println!(
            " - {:12} base={:6} kind={:7} perp={:5} vol24h=${:.0}",
            market.id, market.base, market.kind, market.is_perp, market.volume_usd_24h
        );
    }
    for skipped in &report.skipped {
        eprintln!("skipped: {skipped}");
    }

    // Rank perpetual futures by 24h USD volume.
    let filter = MarketFilter {
        perps_only: true,
        ..Default::default()
    };
    let top = mercato.top_volumes(5, filter).await?;
    println!("\nTop perp markets by 24h volume: {top:?}");

    Ok(())
}
