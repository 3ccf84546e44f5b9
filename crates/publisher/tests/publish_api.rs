//! HTTP-level tests for the publisher routes.

use std::sync::Arc;

use alert_core::Coordinates;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use event_store::{EventStore, KeyStrategy};
use mock_gateways::StaticGeocoder;
use publisher::{router, AppState, PublisherService};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(store: EventStore, geocoder: StaticGeocoder) -> Router {
    router().with_state(AppState::new(PublisherService::new(Arc::new(geocoder), store)))
}

fn tokyo() -> StaticGeocoder {
    StaticGeocoder::new().with_place("Tokyo", Coordinates::new(35.68, 139.69))
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/publish")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_publish_known_city() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();
    let app = app(store.clone(), tokyo());

    let (status, body) = post_json(
        app,
        json!({"event_type": "EQ", "city": "Tokyo", "state": "", "country": "Japan"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event published successfully!");
    assert_eq!(body["event"]["lat"], 35.68);
    assert_eq!(body["event"]["lng"], 139.69);
    assert_eq!(
        body["event"]["description"],
        "Sudden ground shaking from tectonic movements or volcanic activity."
    );

    let stored: Vec<_> = store.list_pending().unwrap().collect();
    assert_eq!(stored.len(), 1);
    let record = &stored[0].as_ref().unwrap().record;
    assert_eq!(record.event_type, "EQ");
    assert_eq!(record.city, "Tokyo");
    assert_eq!(record.lat, 35.68);
    assert_eq!(record.lng, 139.69);
}

#[tokio::test]
async fn test_stored_record_matches_submission() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();
    let coordinates = Coordinates::new(-33.868_820_123_456_7, 151.209_295_987_654_3);
    let geocoder = StaticGeocoder::new().with_place("Sydney", coordinates);

    let (status, _) = post_json(
        app(store.clone(), geocoder),
        json!({"event_type": "BF", "city": "Sydney", "state": "NSW", "country": "Australia"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = store.list_pending().unwrap().next().unwrap().unwrap();
    assert_eq!(stored.record.event_type, "BF");
    assert_eq!(stored.record.city, "Sydney");
    assert_eq!(stored.record.state, "NSW");
    assert_eq!(stored.record.country, "Australia");
    assert_eq!(stored.record.coordinates(), coordinates);
}

#[tokio::test]
async fn test_unknown_city_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();

    let (status, body) = post_json(
        app(store.clone(), tokyo()),
        json!({"event_type": "EQ", "city": "Nowhere", "state": "", "country": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid location provided.");
    assert_eq!(store.list_pending().unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_city_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();

    let (status, body) = post_json(app(store.clone(), tokyo()), json!({"event_type": "EQ"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "city is required");
    assert_eq!(store.list_pending().unwrap().count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();

    let (status, body) = post_json(app(store, tokyo()), json!(["not", "an", "object"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_geocoder_outage_is_bad_gateway() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();

    let (status, body) = post_json(
        app(store.clone(), StaticGeocoder::unavailable()),
        json!({"event_type": "EQ", "city": "Tokyo", "state": "", "country": "Japan"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
    assert_eq!(store.list_pending().unwrap().count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("data");
    let store = EventStore::open(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let (status, _) = post_json(
        app(store, tokyo()),
        json!({"event_type": "EQ", "city": "Tokyo", "state": "", "country": "Japan"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_same_type_and_city_overwrites_by_default() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path()).unwrap();
    let app = app(store.clone(), tokyo());

    for country in ["Japan", "JP"] {
        let (status, _) = post_json(
            app.clone(),
            json!({"event_type": "EQ", "city": "Tokyo", "state": "", "country": country}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let stored: Vec<_> = store.list_pending().unwrap().map(|e| e.unwrap()).collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record.country, "JP");
}

#[tokio::test]
async fn test_unique_keys_keep_every_submission() {
    let temp = TempDir::new().unwrap();
    let store = EventStore::open(temp.path())
        .unwrap()
        .with_key_strategy(KeyStrategy::Unique);
    let app = app(store.clone(), tokyo());

    for _ in 0..2 {
        let (status, _) = post_json(
            app.clone(),
            json!({"event_type": "EQ", "city": "Tokyo", "state": "", "country": "Japan"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(store.list_pending().unwrap().count(), 2);
}

#[tokio::test]
async fn test_health() {
    let temp = TempDir::new().unwrap();
    let app = app(EventStore::open(temp.path()).unwrap(), tokyo());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
