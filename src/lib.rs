//! Ingestion and display endpoint for a single temperature/humidity sensor feed.
//!
//! A device periodically pushes readings to `POST /update`. The service keeps
//! only the latest accepted reading and derives a connectivity status from how
//! long ago it arrived:
//!
//! ```text
//! age <= 10s        connected
//! 10s < age <= 30s  stale
//! age > 30s         offline   (also when nothing was ever received)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and rejection reasons
//! - [`sensor`]: Validation, observation store, and status evaluation
//! - [`api`]: HTTP API and dashboard
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sensor;
pub mod utils;

pub use config::Config;
pub use error::{RejectionReason, Result, ServiceError};
