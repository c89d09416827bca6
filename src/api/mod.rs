//! HTTP API module: ingestion, snapshot, health, dashboard, and metrics endpoints.

pub mod dashboard;
pub mod handlers;
pub mod responses;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
