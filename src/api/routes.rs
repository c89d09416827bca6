//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{data, health, index, prometheus, update, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(index))
        // Sensor feed
        .route("/update", post(update))
        .route("/data", get(data))
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
