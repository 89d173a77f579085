//! # Ingest → Report Integration Tests
//!
//! Drives both operations against the in-memory store with a scripted feed,
//! covering the overwrite, missing-day and end-to-end scenarios.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use lib_rates::connections::{DailyRateRecord, MemoryRateStore, RateStore};
use lib_rates::ingestors::{FeedSource, RateIngestor, INGEST_OK};
use lib_rates::markets::ecb::RateMap;
use lib_rates::reporters::{RateReporter, REPORT_FAILED};
use lib_rates::RatesError;

/// A feed that serves the queued documents in order, repeating the last one.
struct ScriptedFeed {
    docs: Mutex<Vec<String>>,
}

impl ScriptedFeed {
    fn new(docs: &[&str]) -> Self {
        let mut docs: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
        docs.reverse();
        Self { docs: Mutex::new(docs) }
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch(&self) -> Result<String, RatesError> {
        let mut docs = self.docs.lock().unwrap();
        if docs.len() > 1 {
            Ok(docs.pop().unwrap())
        } else {
            docs.last()
                .cloned()
                .ok_or_else(|| RatesError::UpstreamFetch("no document queued".into()))
        }
    }
}

/// A store that is always down.
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

fn jan(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn rates(pairs: &[(&str, f64)]) -> RateMap {
    pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect()
}

#[tokio::test]
async fn test_end_to_end_ingest_then_report() {
    let store = MemoryRateStore::new();
    store
        .put(&DailyRateRecord::new(jan(1), rates(&[("USD", 1.0800)])))
        .await
        .unwrap();

    let feed = ScriptedFeed::new(&[r#"<Cube currency="USD" rate="1.1000"/><Cube currency="JPY" rate="160.00"/>"#]);
    let ingestor = RateIngestor::new(Arc::new(feed), Arc::new(store.clone()));

    let ingested = ingestor.ingest_on(jan(2)).await;
    assert_eq!(ingested.status_code, 200);
    assert_eq!(ingested.body, json!({ "message": INGEST_OK }));

    let stored = store.get(jan(2)).await.unwrap();
    assert_eq!(stored.rates, rates(&[("USD", 1.1), ("JPY", 160.0)]));
    assert_eq!(
        serde_json::to_value(&stored).unwrap(),
        json!({ "date": "2024-01-02", "rates": { "USD": 1.1, "JPY": 160.0 } })
    );

    let reporter = RateReporter::new(Arc::new(store.clone()));
    let report = reporter.report_on(jan(2)).await;
    assert_eq!(report.status_code, 200);
    assert_eq!(
        report.body,
        json!({
            "date": "2024-01-02",
            "rates": {
                "USD": { "currentRate": 1.1, "change": "0.0200" },
                "JPY": { "currentRate": 160.0, "change": "N/A" }
            }
        })
    );
}

#[tokio::test]
async fn test_second_ingest_same_day_overwrites() {
    let store = MemoryRateStore::new();
    let feed = ScriptedFeed::new(&[
        r#"<Cube currency="USD" rate="1.1000"/><Cube currency="JPY" rate="160.00"/>"#,
        r#"<Cube currency="USD" rate="1.1050"/>"#,
    ]);
    let ingestor = RateIngestor::new(Arc::new(feed), Arc::new(store.clone()));

    ingestor.ingest_on(jan(2)).await;
    ingestor.ingest_on(jan(2)).await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(jan(2)).await.unwrap().rates, rates(&[("USD", 1.105)]));
}

#[tokio::test]
async fn test_report_without_yesterday_marks_every_change_unavailable() {
    let store = MemoryRateStore::new();
    store
        .put(&DailyRateRecord::new(jan(2), rates(&[("USD", 1.1), ("GBP", 0.86)])))
        .await
        .unwrap();

    let report = RateReporter::new(Arc::new(store)).try_report_on(jan(2)).await.unwrap();
    assert_eq!(report.rates.len(), 2);
    assert!(report.rates.values().all(|line| line.change == "N/A"));
}

#[tokio::test]
async fn test_report_without_today_is_empty() {
    let store = MemoryRateStore::new();
    store
        .put(&DailyRateRecord::new(jan(1), rates(&[("USD", 1.08)])))
        .await
        .unwrap();

    let envelope = RateReporter::new(Arc::new(store)).report_on(jan(2)).await;
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.body, json!({ "date": "2024-01-02", "rates": {} }));
}

#[tokio::test]
async fn test_store_outage_collapses_to_generic_500() {
    let reporter = RateReporter::new(Arc::new(UnavailableStore));
    let envelope = reporter.report_on(jan(2)).await;
    assert_eq!(envelope.status_code, 500);
    assert_eq!(envelope.body, json!({ "error": REPORT_FAILED }));

    let feed = ScriptedFeed::new(&[r#"<Cube currency="USD" rate="1.1"/>"#]);
    let ingestor = RateIngestor::new(Arc::new(feed), Arc::new(UnavailableStore));
    let envelope = ingestor.ingest_on(jan(2)).await;
    assert_eq!(envelope.status_code, 500);
    assert_eq!(envelope.body, json!({ "error": "Failed to fetch exchange rates." }));
}
