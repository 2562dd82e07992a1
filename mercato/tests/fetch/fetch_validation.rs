use crate::helpers::{mercato_default, mercato_with};
use mercato::{Mercato, MercatoError, Timeframe};
use mercato_core::ExchangeGateway;
use mercato_mock::MockGateway;

// A gateway that advertises no capabilities at all.
struct BareGateway;
impl ExchangeGateway for BareGateway {
    fn name(&self) -> &'static str {
        "bare"
    }
    fn seconds(&self) -> i64 {
        0
    }
}

#[tokio::test]
async fn malformed_start_date_fails_before_any_gateway_call() {
    let (mercato, gateway) = mercato_default();

    let err = mercato
        .history("BTC/USD", Timeframe::D1, Some("01-01-2021"))
        .await
        .unwrap_err();

    assert!(matches!(err, MercatoError::InvalidArg(_)));
    assert_eq!(gateway.ohlcv_calls(), 0);
}

#[tokio::test]
async fn unsupported_timeframe_fails_before_any_gateway_call() {
    let (mercato, gateway) = mercato_default();

    // The mock serves 1m/1h/1d only.
    let err = mercato
        .history("BTC/USD", Timeframe::W1, None)
        .await
        .unwrap_err();

    assert!(matches!(err, MercatoError::InvalidArg(_)));
    assert_eq!(gateway.ohlcv_calls(), 0);
}

#[tokio::test]
async fn gateway_without_ohlcv_capability_is_unsupported() {
    let mercato = Mercato::builder()
        .gateway(std::sync::Arc::new(BareGateway))
        .build()
        .unwrap();

    let err = mercato
        .history("BTC/USD", Timeframe::D1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::Unsupported { capability: "ohlcv" }));

    let err = mercato.markets(Default::default()).await.unwrap_err();
    assert!(matches!(err, MercatoError::Unsupported { capability: "markets" }));
}

#[tokio::test]
async fn combined_history_rejects_empty_and_duplicate_symbol_lists() {
    let (mercato, gateway) = mercato_default();

    let err = mercato
        .combined_history(&[], Timeframe::D1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::InvalidArg(_)));

    let err = mercato
        .combined_history(&["BTC/USD", "ETH/USD", "BTC/USD"], Timeframe::D1, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("duplicate symbol 'BTC/USD'"));

    assert_eq!(gateway.ohlcv_calls(), 0);
}

#[tokio::test]
async fn builder_without_gateway_is_rejected() {
    let err = Mercato::builder().build().unwrap_err();
    assert!(matches!(err, MercatoError::InvalidArg(_)));
}

#[tokio::test]
async fn gateway_name_reports_the_configured_venue() {
    let (mercato, _) = mercato_with(MockGateway::new());
    assert_eq!(mercato.gateway_name(), "mercato-mock");
}
