//! HTTP routes driven through the full router with a canned price source

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use minmax::config::Config;
use minmax::services::{AnalysisService, WindowAggregator};
use minmax::sources::SeriesSource;
use minmax::{build_router, AppError, AppState, Commodity, Result, SeriesMetadata, TimeSeries};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Serves a fixed series for every commodity.
struct CannedSource;

#[axum::async_trait]
impl SeriesSource for CannedSource {
    async fn fetch(&self, commodity: Commodity) -> Result<(TimeSeries, SeriesMetadata)> {
        let body = json!({
            "d": {
                "Data": {
                    "Expiry": "05FEB2021",
                    "MaxDate": 1609923600000u64,
                    "MinDate": 1609900200000u64,
                    "ScripName": commodity.upstream_name().to_uppercase(),
                    "IntradayGraphPlot": [
                        {"x": 1609900200000u64, "y": 5.0},
                        {"x": 1609900260000u64, "y": 3.0},
                        {"x": 1609900320000u64, "y": 4.0},
                        {"x": 1609900380000u64, "y": 1.0},
                        {"x": 1609900440000u64, "y": 6.0}
                    ]
                }
            }
        });
        minmax::sources::mcx::parse_chart(body.to_string().as_bytes())
    }
}

/// Always answers like a provider that rejected the request.
struct FailingSource;

#[axum::async_trait]
impl SeriesSource for FailingSource {
    async fn fetch(&self, _commodity: Commodity) -> Result<(TimeSeries, SeriesMetadata)> {
        Err(AppError::Upstream(json!({"Message": "Invalid web service call"})))
    }
}

fn app(source: Arc<dyn SeriesSource>) -> axum::Router {
    let config = Config {
        hops: vec![1, 2],
        upstream_url: "http://127.0.0.1:9/chart".to_string(),
        ..Config::default()
    };
    let analysis = AnalysisService::new(source, WindowAggregator::new(config.hops.clone()));
    build_router(AppState {
        config: Arc::new(config),
        analysis,
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

async fn send(app: axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_analysis_success() {
    let (status, body) = get(app(Arc::new(CannedSource)), "/api/v1?commodity=gold").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "");
    let data = &body["data"];
    assert_eq!(data["summary"]["commodity"], "GOLD");
    assert_eq!(data["summary"]["expiry_date"], "05FEB2021");
    assert_eq!(data["summary"]["from"], "2021-01-06T08:00:00+05:30");

    let intervals = data["intervals"].as_object().unwrap();
    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals["1 minute"]["minima"]["price"], 1.0);
    assert_eq!(intervals["1 minute"]["maxima"]["price"], 4.0);
    assert_eq!(intervals["1 minute"]["result"]["buy_cap"], 1.75);
    assert_eq!(intervals["1 minute"]["result"]["sell_cap"], 3.25);
}

#[tokio::test]
async fn test_analysis_any_subpath() {
    let (status, body) = get(
        app(Arc::new(CannedSource)),
        "/api/v1/anything?commodity=SILVER",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["commodity"], "SILVER");
}

#[tokio::test]
async fn test_repeated_commodity_uses_first() {
    let (status, body) = get(
        app(Arc::new(CannedSource)),
        "/api/v1?commodity=gold&commodity=silver",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "");
    assert_eq!(body["data"]["summary"]["commodity"], "GOLD");
}

#[tokio::test]
async fn test_any_method_is_served() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = send(
            app(Arc::new(CannedSource)),
            method,
            "/api/v1?commodity=copper",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["commodity"], "COPPER");
    }

    let (status, body) = send(app(Arc::new(CannedSource)), Method::POST, "/api/v1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "commodity must be specified");
}

#[tokio::test]
async fn test_missing_commodity() {
    let (status, body) = get(app(Arc::new(CannedSource)), "/api/v1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "commodity must be specified");
    assert!(body["data"].is_null());

    let (status, _) = get(app(Arc::new(CannedSource)), "/api/v1?commodity=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_commodity() {
    let (status, body) = get(app(Arc::new(CannedSource)), "/api/v1?commodity=platinum").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid commodity");
}

#[tokio::test]
async fn test_upstream_failure_passes_payload() {
    let (status, body) = get(app(Arc::new(FailingSource)), "/api/v1?commodity=zinc").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Sorry, something went wrong :(");
    assert_eq!(body["data"]["Message"], "Invalid web service call");
}

#[tokio::test]
async fn test_unknown_path() {
    let (status, body) = get(app(Arc::new(CannedSource)), "/api/v2?commodity=gold").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "404 page not found");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(Arc::new(CannedSource)), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["hops"], json!([1, 2]));
    assert_eq!(body["upstream"], "http://127.0.0.1:9/chart");
}
