use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tickbridge_core::YahooSource;
use tickbridge_tests::ReplayHttpClient;
use tickbridge_web::state::AppState;
use tower::ServiceExt;

fn app(transport: ReplayHttpClient) -> axum::Router {
    let source = YahooSource::new(Arc::new(transport));
    tickbridge_web::router(AppState::new(Arc::new(source)))
}

async fn send(transport: ReplayHttpClient, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(transport)
        .oneshot(request)
        .await
        .expect("request handled");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn range_payload() -> Value {
    json!({
        "symbol": " aapl ",
        "start_date": "2024-01-02",
        "end_date": "2024-01-04"
    })
}

fn chart_body() -> String {
    json!({
        "chart": {
            "result": [{
                "timestamp": [1_704_153_600_i64, 1_704_240_000_i64, 1_704_326_400_i64],
                "indicators": {
                    "quote": [{
                        "open": [9.8, 19.5, 15.2],
                        "high": [10.4, 20.6, 15.9],
                        "low": [9.5, 19.1, 14.6],
                        "close": [10.0, 20.0, 15.0],
                        "volume": [1_000_000_i64, 1_250_000_i64, 900_000_i64]
                    }],
                    "adjclose": [{"adjclose": [10.0, 20.0, 15.0]}]
                }
            }],
            "error": null
        }
    })
    .to_string()
}

fn summary_body() -> String {
    json!({
        "quoteSummary": {
            "result": [{
                "assetProfile": {
                    "longBusinessSummary": "Designs consumer electronics.",
                    "industry": "Consumer Electronics",
                    "sector": "Technology",
                    "website": "https://www.apple.com",
                    "companyOfficers": [
                        {"name": "Jane Roe", "title": "CEO", "age": 55, "yearBorn": 1969}
                    ]
                },
                "price": {
                    "longName": "Apple Inc.",
                    "currency": "USD",
                    "regularMarketPrice": {"raw": 186.1},
                    "regularMarketPreviousClose": {"raw": 185.2},
                    "regularMarketOpen": {"raw": 185.5},
                    "regularMarketDayHigh": {"raw": 186.9},
                    "regularMarketDayLow": {"raw": 184.1},
                    "regularMarketVolume": {"raw": 50_000_000.0},
                    "marketCap": {"raw": 2.9e12}
                },
                "summaryDetail": {
                    "fiftyTwoWeekHigh": {"raw": 199.6},
                    "fiftyTwoWeekLow": {"raw": 124.2}
                }
            }],
            "error": null
        }
    })
    .to_string()
}

fn not_found_body() -> String {
    json!({
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    })
    .to_string()
}

#[tokio::test]
async fn company_info_flow_shapes_profile() {
    let (status, body) = send(
        ReplayHttpClient::ok(summary_body()),
        get("/api/company-info/aapl"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["name"], "Apple Inc.");
    assert_eq!(body["industry"], "Consumer Electronics");
    assert_eq!(body["officers"][0]["year_born"], 1969);
}

#[tokio::test]
async fn stock_data_flow_shapes_snapshot() {
    let (status, body) = send(
        ReplayHttpClient::ok(summary_body()),
        get("/api/stock-data/aapl"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["last_price"], 186.1);
    assert_eq!(body["volume"], 50_000_000_u64);
    assert_eq!(body["fifty_two_week_low"], 124.2);
}

#[tokio::test]
async fn historical_flow_returns_ordered_bars() {
    let (status, body) = send(
        ReplayHttpClient::ok(chart_body()),
        post_json("/api/historical-data", range_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["interval"], "1d");

    let data = body["data"].as_array().expect("bars");
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["date"], "2024-01-02");
    assert_eq!(data[2]["date"], "2024-01-04");
    assert_eq!(data[1]["close"], 20.0);
    assert_eq!(data[1]["volume"], 1_250_000_u64);
}

#[tokio::test]
async fn insights_flow_computes_reference_metrics() {
    let (status, body) = send(
        ReplayHttpClient::ok(chart_body()),
        post_json("/api/analytical-insights", range_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["start_date"], "2024-01-02");
    assert_eq!(body["end_date"], "2024-01-04");
    assert_eq!(body["average_close"], 15.0);
    assert_eq!(body["highest_close"], 20.0);
    assert_eq!(body["lowest_close"], 10.0);
    assert_eq!(body["closing_price_volatility"], 5.0);
    assert_eq!(body["total_return"], 0.5);
}

#[tokio::test]
async fn delisted_symbol_is_a_client_error_not_an_outage() {
    let (status, body) = send(
        ReplayHttpClient::status(404, not_found_body()),
        post_json("/api/historical-data", range_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "no historical data found for the specified parameters"
    );
}

#[tokio::test]
async fn unreachable_upstream_maps_to_bad_gateway() {
    for request in [
        get("/api/company-info/aapl"),
        get("/api/stock-data/aapl"),
        post_json("/api/historical-data", range_payload()),
        post_json("/api/analytical-insights", range_payload()),
    ] {
        let (status, body) = send(ReplayHttpClient::failing(), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"],
            "Failed to retrieve data from upstream provider"
        );
    }
}

#[tokio::test]
async fn validation_short_circuits_before_any_fetch() {
    // a failing transport is never reached when the payload is invalid
    let (status, body) = send(
        ReplayHttpClient::failing(),
        post_json(
            "/api/historical-data",
            json!({
                "symbol": "AAPL",
                "start_date": "2024-13-01",
                "end_date": "2024-01-01"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("YYYY-MM-DD"));
}
