use std::time::Duration;

use crate::helpers::{mercato_default, mercato_with};
use mercato::{Mercato, MercatoError, Timeframe};
use mercato_mock::MockGateway;

#[tokio::test]
async fn gateway_failure_is_tagged_with_the_symbol() {
    let (mercato, _) = mercato_default();

    let err = mercato.history("FAIL", Timeframe::D1, None).await.unwrap_err();

    match err {
        MercatoError::Gateway { exchange, symbol, msg } => {
            assert_eq!(exchange, "mercato-mock");
            assert_eq!(symbol.as_deref(), Some("FAIL"));
            assert!(msg.contains("forced failure"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn combined_history_aborts_on_the_first_failing_symbol() {
    let (mercato, gateway) = mercato_default();

    let err = mercato
        .combined_history(&["BTC/USD", "FAIL", "ETH/USD"], Timeframe::D1, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MercatoError::Gateway { ref symbol, .. } if symbol.as_deref() == Some("FAIL")
    ));
    // BTC's two calls plus the failing call; ETH is never reached.
    assert_eq!(gateway.ohlcv_calls(), 3);
}

#[tokio::test]
async fn slow_gateway_call_surfaces_as_gateway_timeout() {
    let gateway = std::sync::Arc::new(MockGateway::new());
    let mercato = Mercato::builder()
        .gateway(gateway)
        .gateway_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = mercato.history("TIMEOUT", Timeframe::D1, None).await.unwrap_err();

    assert!(matches!(
        err,
        MercatoError::GatewayTimeout { capability: "ohlcv", .. }
    ));
}

#[tokio::test]
async fn fast_calls_are_unaffected_by_a_generous_timeout() {
    let (mercato, _) = mercato_with(MockGateway::new());
    let series = mercato.history("BTC/USD", Timeframe::D1, None).await.unwrap();
    assert_eq!(series.len(), 2);
}
