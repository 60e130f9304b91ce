//! AlphaVantageClient tests against a mocked upstream
//!
//! Each test starts a wiremock server standing in for www.alphavantage.co
//! and checks the request the client sends and how the body is decoded.

use fin_core::{AlphaVantageClient, Config, Error, InfoType};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AlphaVantageClient {
    AlphaVantageClient::new(Config::new("test-key", server.uri()).unwrap())
}

#[tokio::test]
async fn daily_time_series_sends_full_output_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("outputsize", "full"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "187.15",
                    "2. high": "188.44",
                    "3. low": "183.89",
                    "4. close": "185.64",
                    "5. volume": "82488674"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let series = client_for(&server).daily_time_series("AAPL").await.unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series.latest_date(), Some("2024-01-02"));
    let bar = series.get("2024-01-02").unwrap();
    assert_eq!(bar.get(InfoType::Close), "185.64");
    assert_eq!(bar.get(InfoType::Volume), "82488674");
}

#[tokio::test]
async fn daily_time_series_surfaces_advisory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Error Message": "Invalid API call."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .daily_time_series("NOPE")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
    assert_eq!(err.to_string(), "Invalid API call.");
}

#[tokio::test]
async fn daily_time_series_missing_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .daily_time_series("AAPL")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingField {
            field: "Time Series (Daily)"
        }
    ));
}

#[tokio::test]
async fn server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).dividends("AAPL").await.unwrap_err();

    match err {
        Error::Status { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).etf_holdings("QQQ").await.unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn dividends_decodes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("function", "DIVIDENDS"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "AAPL",
            "data": [
                {"ex_dividend_date": "2024-02-09", "amount": "0.24", "payment_date": "2024-02-15"}
            ]
        })))
        .mount(&server)
        .await;

    let records = client_for(&server).dividends("AAPL").await.unwrap().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ex_dividend_date, "2024-02-09");
    assert_eq!(records[0].amount, "0.24");
    assert_eq!(records[0].payment_date, "2024-02-15");
}

#[tokio::test]
async fn dividends_absent_vs_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("symbol", "EMPTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("symbol", "NONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"symbol": "NONE"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.dividends("EMPTY").await.unwrap(), Some(vec![]));
    assert_eq!(client.dividends("NONE").await.unwrap(), None);
}

#[tokio::test]
async fn etf_holdings_decodes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("function", "ETF_PROFILE"))
        .and(query_param("symbol", "QQQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "net_assets": "300000000000",
            "holdings": [
                {"symbol": "AAPL", "description": "APPLE INC", "weight": "0.0888"},
                {"symbol": "MSFT", "description": "MICROSOFT CORP", "weight": "0.0812"}
            ]
        })))
        .mount(&server)
        .await;

    let holdings = client_for(&server)
        .etf_holdings("QQQ")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(holdings.len(), 2);
    assert_eq!(holdings[1].description, "MICROSOFT CORP");
    assert_eq!(holdings[1].weight, "0.0812");
}

#[tokio::test]
async fn exchange_rate_sends_both_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("function", "CURRENCY_EXCHANGE_RATE"))
        .and(query_param("from_currency", "BTC"))
        .and(query_param("to_currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "BTC",
                "3. To_Currency Code": "USD",
                "5. Exchange Rate": "43000.12000000"
            }
        })))
        .mount(&server)
        .await;

    let rate = client_for(&server)
        .exchange_rate("BTC", "USD")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(rate.rate, "43000.12000000");
}

#[tokio::test]
async fn exchange_rate_without_rate_field_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Realtime Currency Exchange Rate": {"1. From_Currency Code": "USD"}
        })))
        .mount(&server)
        .await;

    let rate = client_for(&server).exchange_rate("USD", "EUR").await.unwrap();
    assert!(rate.is_none());
}

#[tokio::test]
async fn connection_failure_hides_api_key() {
    // Nothing listens on the discard port.
    let config = Config::new("super-secret", "http://127.0.0.1:9").unwrap();
    let err = AlphaVantageClient::new(config)
        .dividends("AAPL")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(!err.to_string().contains("super-secret"));
}
