//! End-to-end tests for the sensor feed service.
//!
//! These drive the full router in-process with a manual clock, so no network
//! or real time is involved.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use time::macros::datetime;
use time::Duration;
use tower::ServiceExt;

use sensor_feed::api::{create_router, AppState};
use sensor_feed::sensor::{ConnectivityStatus, ManualClock, Reading};

fn service() -> (Router, AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(datetime!(2024-06-01 12:00:00 UTC)));
    let state = AppState::new(clock.clone(), 5);
    (create_router(state.clone()), state, clock)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/update")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    call(app, request).await
}

async fn fetch(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[tokio::test]
async fn submit_then_fetch_shows_reading_connected() {
    let (app, _, _) = service();

    let (status, body) = submit(&app, json!({"temperature": 23.5, "humidity": 60})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) = fetch(&app, "/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "temperature": 23.5,
            "humidity": 60.0,
            "last_update": "2024-06-01T12:00:00Z",
            "connection_status": "connected",
        })
    );
}

#[tokio::test]
async fn rejected_submission_leaves_state_unchanged() {
    let (app, state, clock) = service();

    submit(&app, json!({"temperature": 21.0, "humidity": 45.0})).await;
    let before = state.store.read().await;

    clock.advance(Duration::seconds(2));
    let (status, body) = submit(&app, json!({"temperature": -50, "humidity": 60})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "range_error");
    assert_eq!(body["field"], "temperature");

    assert_eq!(state.store.read().await, before);
}

#[tokio::test]
async fn every_rejection_reason_is_reported() {
    let (app, state, _) = service();

    let cases = [
        (json!({}), "missing_body"),
        (json!({"humidity": 60}), "missing_fields"),
        (json!({"temperature": 23.5}), "missing_fields"),
        (json!({"temperature": "hot", "humidity": 60}), "type_error"),
        (json!({"temperature": 100, "humidity": 60}), "range_error"),
        (json!({"temperature": 23.5, "humidity": -10}), "range_error"),
        (json!({"temperature": 23.5, "humidity": 150}), "range_error"),
    ];

    for (payload, code) in cases {
        let (status, body) = submit(&app, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["error"], code, "payload {payload}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    assert_eq!(state.store.read().await.observation, None);
}

#[tokio::test]
async fn envelope_edges_are_accepted() {
    let (app, _, _) = service();

    for payload in [
        json!({"temperature": -40, "humidity": 50}),
        json!({"temperature": 85, "humidity": 50}),
        json!({"temperature": 20, "humidity": 0}),
        json!({"temperature": 20, "humidity": 100}),
    ] {
        let (status, _) = submit(&app, payload.clone()).await;
        assert_eq!(status, StatusCode::OK, "payload {payload}");
    }
}

#[tokio::test]
async fn health_tracks_freshness_and_uptime() {
    let (app, _, clock) = service();

    let (_, body) = fetch(&app, "/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["connection_status"], "offline");
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["last_update"], Value::Null);
    assert_eq!(body["uptime_seconds"], 0.0);

    clock.advance(Duration::seconds(3));
    submit(&app, json!({"temperature": 19.0, "humidity": 55.0})).await;

    for (advance_ms, expected) in [
        (9_000, ConnectivityStatus::Connected),
        (1_000, ConnectivityStatus::Connected),
        (1, ConnectivityStatus::Stale),
        (19_999, ConnectivityStatus::Stale),
        (1, ConnectivityStatus::Offline),
    ] {
        clock.advance(Duration::milliseconds(advance_ms));
        let (_, body) = fetch(&app, "/health").await;
        assert_eq!(body["connection_status"], expected.to_string());
    }

    let (_, body) = fetch(&app, "/health").await;
    assert_eq!(body["data"], json!({"temperature": 19.0, "humidity": 55.0}));
    assert_close(&body["seconds_since_update"], 30.001);
    assert_close(&body["uptime_seconds"], 33.001);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_converge_to_one_of_them() {
    let (app, state, _) = service();

    let submitted: Vec<Reading> = (0..32)
        .map(|i| Reading::new(f64::from(i), f64::from(i) + 50.0))
        .collect();

    let mut handles = Vec::new();
    for reading in submitted.iter().copied() {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let payload = json!({"temperature": reading.temperature, "humidity": reading.humidity});
            submit(&app, payload).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let last = state.store.read().await.reading().unwrap();
    assert!(submitted.contains(&last));
}
