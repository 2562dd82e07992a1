use std::time::Duration;

use crate::helpers::mercato_default;
use mercato::{Mercato, MercatoError, Timeframe};
use mercato_mock::MockGateway;

#[tokio::test]
async fn download_joins_all_requested_symbols() {
    let (mercato, _) = mercato_default();

    let report = mercato
        .download()
        .symbols(&["BTC/USD", "ETH/USD"])
        .unwrap()
        .timeframe(Timeframe::D1)
        .run()
        .await
        .unwrap();

    assert!(report.warnings.is_empty());
    let frame = report.frame.expect("joined frame");
    assert_eq!(frame.symbols(), ["BTC/USD", "ETH/USD"]);
    assert_eq!(frame.len(), 4);
}

#[tokio::test]
async fn failed_symbols_become_warnings_without_aborting_the_batch() {
    let (mercato, _) = mercato_default();

    let report = mercato
        .download()
        .symbols(&["BTC/USD", "FAIL", "ETH/USD"])
        .unwrap()
        .run()
        .await
        .unwrap();

    let frame = report.frame.expect("joined frame");
    assert_eq!(frame.symbols(), ["BTC/USD", "ETH/USD"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0],
        MercatoError::Gateway { ref symbol, .. } if symbol.as_deref() == Some("FAIL")
    ));
}

#[tokio::test]
async fn all_symbols_failing_yields_no_frame() {
    let (mercato, _) = mercato_default();

    let report = mercato.download().symbols(&["FAIL"]).unwrap().run().await.unwrap();

    assert!(report.frame.is_none());
    assert_eq!(report.warnings.len(), 1);
}

#[tokio::test]
async fn download_rejects_duplicate_symbols() {
    let (mercato, _) = mercato_default();

    let err = mercato
        .download()
        .symbols(&["BTC/USD", "BTC/USD"])
        .unwrap_err();
    assert!(err.to_string().contains("duplicate symbol 'BTC/USD'"));

    let err = mercato
        .download()
        .symbols(&["BTC/USD"])
        .unwrap()
        .add_symbol("BTC/USD")
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn download_rejects_an_empty_symbol_list() {
    let (mercato, _) = mercato_default();

    let err = mercato.download().run().await.unwrap_err();
    assert!(err.to_string().contains("no symbols specified"));
}

#[tokio::test]
async fn download_rejects_a_malformed_start_date() {
    let (mercato, gateway) = mercato_default();

    let err = mercato
        .download()
        .symbols(&["BTC/USD"])
        .unwrap()
        .start("yesterday")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, MercatoError::InvalidArg(_)));
    assert_eq!(gateway.ohlcv_calls(), 0);
}

#[tokio::test]
async fn request_deadline_bounds_the_whole_batch() {
    let mercato = Mercato::builder()
        .gateway(std::sync::Arc::new(MockGateway::new()))
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = mercato
        .download()
        .symbols(&["TIMEOUT"])
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MercatoError::RequestTimeout { capability: "download:history" }
    ));
}
