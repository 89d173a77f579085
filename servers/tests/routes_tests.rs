//! Router tests: drive the axum app in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use lib_rates::core::today_utc;
use lib_rates::{DailyRateRecord, FeedSource, MemoryRateStore, RateStore, RatesError};
use servers::rates_logic::routes::create_router;
use servers::rates_logic::state::AppState;

struct StaticFeed(&'static str);

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<String, RatesError> {
        Ok(self.0.to_string())
    }
}

struct DownFeed;

#[async_trait]
impl FeedSource for DownFeed {
    async fn fetch(&self) -> Result<String, RatesError> {
        Err(RatesError::UpstreamFetch("feed unreachable".into()))
    }
}

struct UnavailableStore;

#[async_trait]
impl RateStore for UnavailableStore {
    async fn put(&self, _record: &DailyRateRecord) -> Result<(), RatesError> {
        Err(RatesError::UpstreamFetch("store unavailable".into()))
    }

    async fn batch_get(&self, _dates: &[NaiveDate]) -> Result<Vec<DailyRateRecord>, RatesError> {
        Err(RatesError::UpstreamFetch("store unavailable".into()))
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let state = AppState::new(Arc::new(DownFeed), Arc::new(MemoryRateStore::new()));
    let response = create_router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_ingest_then_report_over_http() {
    let store = MemoryRateStore::new();
    let yesterday = lib_rates::core::previous_day(today_utc());
    store
        .put(&DailyRateRecord::new(
            yesterday,
            [("USD".to_string(), 1.08)].into_iter().collect(),
        ))
        .await
        .unwrap();

    let feed = StaticFeed(r#"<Cube currency="USD" rate="1.1000"/><Cube currency="JPY" rate="160.00"/>"#);
    let app = create_router(AppState::new(Arc::new(feed), Arc::new(store.clone())));

    let response = app
        .clone()
        .oneshot(Request::builder().method("POST").uri("/ingest").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Exchange rates fetched and stored successfully." })
    );

    let response = app
        .oneshot(Request::builder().uri("/rates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["rates"]["USD"], json!({ "currentRate": 1.1, "change": "0.0200" }));
    assert_eq!(body["rates"]["JPY"], json!({ "currentRate": 160.0, "change": "N/A" }));
}

#[tokio::test]
async fn test_failed_ingest_is_http_500() {
    let app = create_router(AppState::new(Arc::new(DownFeed), Arc::new(MemoryRateStore::new())));
    let response = app
        .oneshot(Request::builder().method("POST").uri("/ingest").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch exchange rates." }));
}

#[tokio::test]
async fn test_report_on_empty_store() {
    let app = create_router(AppState::new(Arc::new(DownFeed), Arc::new(MemoryRateStore::new())));
    let response = app
        .oneshot(Request::builder().uri("/rates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], json!(today_utc().to_string()));
    assert_eq!(body["rates"], json!({}));
}

#[tokio::test]
async fn test_report_on_unavailable_store_is_http_500() {
    let app = create_router(AppState::new(Arc::new(DownFeed), Arc::new(UnavailableStore)));
    let response = app
        .oneshot(Request::builder().uri("/rates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Failed to retrieve exchange rates." }));
}

#[tokio::test]
async fn test_ingest_on_unavailable_store_is_http_500() {
    let feed = StaticFeed(r#"<Cube currency="USD" rate="1.1000"/>"#);
    let app = create_router(AppState::new(Arc::new(feed), Arc::new(UnavailableStore)));
    let response = app
        .oneshot(Request::builder().method("POST").uri("/ingest").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch exchange rates." }));
}
