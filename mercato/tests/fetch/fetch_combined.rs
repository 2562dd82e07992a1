use crate::helpers::mercato_default;
use mercato::Timeframe;

#[tokio::test]
async fn combined_history_outer_joins_on_the_timestamp_union() {
    let (mercato, _) = mercato_default();

    // BTC candles sit at {1000, 2000} ms, ETH at {500, 1500} ms.
    let frame = mercato
        .combined_history(&["BTC/USD", "ETH/USD"], Timeframe::D1, None)
        .await
        .unwrap();

    assert_eq!(frame.symbols(), ["BTC/USD", "ETH/USD"]);
    let index: Vec<i64> = frame.index().iter().map(chrono::DateTime::timestamp_millis).collect();
    assert_eq!(index, vec![500, 1_000, 1_500, 2_000]);

    let btc = frame.lane("BTC/USD").unwrap();
    let eth = frame.lane("ETH/USD").unwrap();
    assert!(btc[0].is_none() && btc[1].is_some() && btc[2].is_none() && btc[3].is_some());
    assert!(eth[0].is_some() && eth[1].is_none() && eth[2].is_some() && eth[3].is_none());
}

#[tokio::test]
async fn single_symbol_frame_has_no_holes() {
    let (mercato, _) = mercato_default();

    let frame = mercato
        .combined_history(&["BTC/USD"], Timeframe::D1, None)
        .await
        .unwrap();

    assert_eq!(frame.len(), 2);
    let lane = frame.lane("BTC/USD").unwrap();
    assert!(lane.iter().all(Option::is_some));
}

#[tokio::test]
async fn cell_values_survive_the_join_unchanged() {
    let (mercato, _) = mercato_default();

    let frame = mercato
        .combined_history(&["BTC/USD", "ETH/USD"], Timeframe::D1, None)
        .await
        .unwrap();

    let ts = chrono::DateTime::from_timestamp_millis(1_000).unwrap();
    assert_eq!(frame.get("BTC/USD", ts).unwrap().close, 105.0);
    let ts = chrono::DateTime::from_timestamp_millis(1_500).unwrap();
    assert_eq!(frame.get("ETH/USD", ts).unwrap().close, 11.5);
}
