use std::sync::Arc;

use mercato::{Mercato, Timeframe};
use mercato_mock::MockGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = Arc::new(MockGateway::new());
    let mercato = Mercato::builder().gateway(gateway).build()?;

    // Fetch several symbols in one batch. Failures become warnings instead of
    // aborting the run; the "FAIL" symbol demonstrates that here.
    let report = mercato
        .download()
        .symbols(&["BTC/USD", "ETH/USD", "FAIL"])?
        .timeframe(Timeframe::D1)
        .run()
        .await?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    let Some(frame) = report.frame else {
        eprintln!("no symbol succeeded");
        return Ok(());
    };

    // Rows unique to one symbol leave holes in the other lanes.
    println!(
        "\nJoined frame: {} rows x {} symbols",
        frame.len(),
        frame.symbols().len()
    );
    print!("{:>12}", "ts");
    for symbol in frame.symbols() {
        print!("{symbol:>12}");
    }
    println!();
    for (row, ts) in frame.index().iter().enumerate() {
        print!("{:>12}", ts.timestamp_millis());
        for symbol in frame.symbols() {
            let lane = frame.lane(symbol).expect("known symbol");
            match &lane[row] {
                Some(cell) => print!("{:>12.2}", cell.close),
                None => print!("{:>12}", "-"),
            }
        }
        println!();
    }

    Ok(())
}
