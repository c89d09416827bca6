//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::dashboard;
use super::responses::{ErrorResponse, HealthResponse, SnapshotResponse, SubmitResponse};
use crate::error::RejectionReason;
use crate::metrics::{self, LatencyTimer};
use crate::sensor::{validate, Clock, ObservationStore, SystemClock};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Latest observation.
    pub store: ObservationStore,
    /// Time source shared by writes and status evaluation.
    pub clock: Arc<dyn Clock>,
    /// Dashboard refresh interval in seconds.
    pub refresh_interval: u64,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state; the process start time is taken from `clock`.
    pub fn new(clock: Arc<dyn Clock>, refresh_interval: u64) -> Self {
        Self {
            store: ObservationStore::new(clock.now()),
            clock,
            refresh_interval,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("clock", &self.clock)
            .field("refresh_interval", &self.refresh_interval)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), 5)
    }
}

/// Submit handler - validates and stores a reading, 400 on rejection.
pub async fn update(State(state): State<AppState>, body: Bytes) -> Response {
    let _timer = LatencyTimer::new("/update");

    match parse_body(&body).and_then(|raw| validate(raw.as_ref())) {
        Ok(reading) => {
            let now = state.clock.now();
            let observation = state.store.write(reading, now).await;
            metrics::record_accepted(&reading);
            info!(
                temperature = reading.temperature,
                humidity = reading.humidity,
                "Reading accepted"
            );
            Json(SubmitResponse::assemble(&observation, now)).into_response()
        }
        Err(reason) => {
            metrics::record_rejected(&reason);
            warn!(reason = reason.code(), "Reading rejected: {}", reason);
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&reason))).into_response()
        }
    }
}

/// Snapshot handler - always returns 200.
pub async fn data(State(state): State<AppState>) -> impl IntoResponse {
    let _timer = LatencyTimer::new("/data");

    let snapshot = state.store.read().await;
    let response = SnapshotResponse::assemble(&snapshot, state.clock.now());
    debug!(status = %response.connection_status, "Snapshot read");
    Json(response)
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let _timer = LatencyTimer::new("/health");

    let snapshot = state.store.read().await;
    Json(HealthResponse::assemble(&snapshot, state.clock.now()))
}

/// Dashboard handler - renders the current snapshot as HTML.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let _timer = LatencyTimer::new("/");

    let snapshot = state.store.read().await;
    let response = SnapshotResponse::assemble(&snapshot, state.clock.now());
    Html(dashboard::render(&response, state.refresh_interval))
}

/// Metrics handler - Prometheus exposition, 404 when no recorder is installed.
pub async fn prometheus(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Parse a request body; a blank body counts as absent.
fn parse_body(body: &[u8]) -> Result<Option<Value>, RejectionReason> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| RejectionReason::MalformedBody {
            detail: e.to_string(),
        })
}
