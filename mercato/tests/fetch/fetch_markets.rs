use crate::helpers::{mercato_default, mercato_with};
use mercato::{MarketFilter, MercatoError};
use mercato_mock::{MockGateway, fixtures};
use serde_json::json;

#[tokio::test]
async fn listing_extracts_good_records_and_skips_broken_ones() {
    let (mercato, _) = mercato_default();

    let report = mercato.markets(MarketFilter::default()).await.unwrap();

    let ids: Vec<&str> = report.markets.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["BTC/USD", "BTC-PERP", "DOGE-0326"]);

    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0],
        MercatoError::Extraction { ref market, .. } if market == "BROKEN-PERP"
    ));
}

#[tokio::test]
async fn every_summary_in_a_listing_shares_one_snapshot_timestamp() {
    let (mercato, _) = mercato_default();

    let report = mercato.markets(MarketFilter::default()).await.unwrap();

    for m in &report.markets {
        assert_eq!(m.timestamp, fixtures::CLOCK_SECONDS);
    }
}

#[tokio::test]
async fn filters_narrow_the_listing_but_still_report_skips() {
    let (mercato, _) = mercato_default();

    let futures = mercato
        .markets(MarketFilter { futures_only: true, perps_only: false })
        .await
        .unwrap();
    let ids: Vec<&str> = futures.markets.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["BTC-PERP", "DOGE-0326"]);
    assert_eq!(futures.skipped.len(), 1);

    let perps = mercato
        .markets(MarketFilter { futures_only: false, perps_only: true })
        .await
        .unwrap();
    let ids: Vec<&str> = perps.markets.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["BTC-PERP"]);
}

#[tokio::test]
async fn custom_gateway_records_are_extracted_with_the_gateway_clock() {
    let record = json!({
        "id": "SOL-PERP",
        "base": "SOL",
        "type": "future",
        "precision": { "amount": 0.01, "price": 0.001 },
        "limits": { "amount": { "min": 0.01 } },
        "info": {
            "bid": 149.9,
            "ask": 150.1,
            "price": 150.0,
            "change1h": 0.002,
            "change24h": "0.04",
            "changeBod": 0.01,
            "volumeUsd24h": 1_234.5,
        },
    });
    let (mercato, _) =
        mercato_with(MockGateway::empty(1_700_000_000).with_markets(vec![record]));

    let report = mercato.markets(MarketFilter::default()).await.unwrap();

    assert!(report.skipped.is_empty());
    let m = &report.markets[0];
    assert_eq!(m.id, "SOL-PERP");
    assert!(m.is_perp);
    assert_eq!(m.change_24h, 0.04);
    assert_eq!(m.volume_usd_24h, 1_234.5);
    assert_eq!(m.timestamp, 1_700_000_000);
}

#[tokio::test]
async fn top_volumes_ranks_by_descending_24h_usd_volume() {
    let (mercato, _) = mercato_default();

    // Fixture volumes: BTC-PERP 200, BTC/USD 50, DOGE-0326 10.
    let top = mercato.top_volumes(2, MarketFilter::default()).await.unwrap();
    assert_eq!(top, ["BTC-PERP", "BTC/USD"]);

    let all = mercato.top_volumes(10, MarketFilter::default()).await.unwrap();
    assert_eq!(all, ["BTC-PERP", "BTC/USD", "DOGE-0326"]);
}

#[tokio::test]
async fn top_volumes_respects_the_filter() {
    let (mercato, _) = mercato_default();

    let top = mercato
        .top_volumes(10, MarketFilter { futures_only: true, perps_only: false })
        .await
        .unwrap();
    assert_eq!(top, ["BTC-PERP", "DOGE-0326"]);
}
