//! Control endpoint and background loop tests.

use std::sync::Arc;
use std::time::Duration;

use alert_core::{Coordinates, EventRecord};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use event_store::EventStore;
use mock_gateways::{FileSynthesizer, FixedLocator, RecordingPlayer, ScriptedNarrator};
use serde_json::{json, Value};
use subscriber::{
    router, AppState, ConsumerConfig, ConsumerLoop, ConsumerSupervisor, Gateways, StartOutcome,
};
use tempfile::TempDir;
use tower::ServiceExt;

const TOKYO: Coordinates = Coordinates {
    lat: 35.68,
    lng: 139.69,
};

fn consumer(data: &TempDir, audio: &TempDir, player: Arc<RecordingPlayer>) -> ConsumerLoop {
    let gateways = Gateways::new(
        Arc::new(FixedLocator::new(TOKYO)),
        Arc::new(ScriptedNarrator::new()),
        Arc::new(FileSynthesizer::new(audio.path())),
        player,
    );
    let config = ConsumerConfig {
        idle_interval: Duration::from_millis(20),
        ..ConsumerConfig::default()
    };
    ConsumerLoop::new(
        EventStore::open(data.path()).unwrap(),
        audio.path(),
        gateways,
        config,
    )
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_start_consumer_is_idempotent() {
    let data = TempDir::new().unwrap();
    let audio = TempDir::new().unwrap();
    let player = Arc::new(RecordingPlayer::new());
    let supervisor = ConsumerSupervisor::new(consumer(&data, &audio, player));
    let app = router().with_state(AppState::new(supervisor));

    let (status, body) = get_json(app.clone(), "/start_consumer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Consumer started!", "already_running": false})
    );

    let (status, body) = get_json(app, "/start_consumer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Consumer started!", "already_running": true})
    );
}

#[tokio::test]
async fn test_health() {
    let data = TempDir::new().unwrap();
    let audio = TempDir::new().unwrap();
    let player = Arc::new(RecordingPlayer::new());
    let supervisor = ConsumerSupervisor::new(consumer(&data, &audio, player));
    let app = router().with_state(AppState::new(supervisor));

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_supervised_loop_announces_later_events() {
    let data = TempDir::new().unwrap();
    let audio = TempDir::new().unwrap();
    let player = Arc::new(RecordingPlayer::new());
    let supervisor = ConsumerSupervisor::new(consumer(&data, &audio, player.clone()));

    assert_eq!(supervisor.start().await, StartOutcome::Started);
    assert!(supervisor.is_running().await);

    // Let the loop go idle at least once before anything is published
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(player.call_count(), 0);

    supervisor
        .consumer()
        .store()
        .put(&EventRecord::new("EQ", "Tokyo", "", "Japan", TOKYO))
        .unwrap();

    let announced = tokio::time::timeout(Duration::from_secs(5), async {
        while player.call_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(announced.is_ok(), "event was never announced");
    assert_eq!(player.call_count(), 1);

    assert_eq!(supervisor.start().await, StartOutcome::AlreadyRunning);
}
