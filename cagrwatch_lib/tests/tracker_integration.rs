use alphavantage_api::Client;
use cagrwatch_lib::{load_symbol_table, CagrTracker, GrowthError, TrackerError};
use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../alphavantage_api/tests/fixtures/{}", name)).unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tracker_for(server: &MockServer) -> CagrTracker<Client> {
    let client = Client::with_base_url(&server.uri(), "test-key".to_string()).unwrap();
    CagrTracker::new(client, load_symbol_table().unwrap())
}

#[tokio::test]
async fn equity_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "IBM"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("equity_daily.json")))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    // 2020-01-01 is a holiday and 2021-01-03 a Sunday: both resolve backwards
    let report = tracker
        .track("IBM", d("2020-01-01"), d("2021-01-03"))
        .await
        .unwrap();

    assert_eq!(report.symbol, "IBM");
    assert_eq!(report.result.resolved_start_date, d("2019-12-31"));
    assert_eq!(report.result.resolved_end_date, d("2020-12-31"));
    // 134.04 -> 125.88 over 366 days
    assert!((report.result.rate - (-6.08)).abs() < 0.01, "rate was {}", report.result.rate);
}

#[tokio::test]
async fn crypto_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "DIGITAL_CURRENCY_DAILY"))
        .and(query_param("symbol", "BTC"))
        .and(query_param("market", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("crypto_daily.json")))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let report = tracker
        .track("BTC-USD", d("2020-01-01"), d("2021-01-01"))
        .await
        .unwrap();

    assert_eq!(report.result.resolved_start_date, d("2020-01-01"));
    assert_eq!(report.result.resolved_end_date, d("2021-01-01"));
    assert!(report.result.rate > 300.0);
}

#[tokio::test]
async fn missing_series_key_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "Meta Data": {} })),
        )
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let err = tracker
        .track("BRK-A", d("2020-01-01"), d("2021-01-01"))
        .await
        .unwrap_err();
    match err {
        TrackerError::MissingSeries { symbol, key } => {
            assert_eq!(symbol, "BRK-A");
            assert_eq!(key, "Time Series (Daily)");
        }
        other => panic!("expected MissingSeries, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_series_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Time Series (Daily)": {} })),
        )
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let err = tracker
        .track("NDXKX", d("2020-01-01"), d("2021-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Growth(GrowthError::EmptySeries)));
}

#[tokio::test]
async fn track_all_skips_throttled_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("symbol", "BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("crypto_daily.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("symbol", "BRK-A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("rate_limited.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("symbol", "NDXKX"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let symbols = tracker.table().default_symbols();
    let outcomes = tracker
        .track_all(&symbols, d("2020-01-01"), d("2021-01-01"))
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].outcome.is_ok());
    assert!(matches!(
        outcomes[1].outcome,
        Err(TrackerError::Fetch(alphavantage_api::Error::RateLimited(_)))
    ));
    assert!(matches!(
        outcomes[2].outcome,
        Err(TrackerError::Fetch(alphavantage_api::Error::HttpStatus { status: 503, .. }))
    ));
}
