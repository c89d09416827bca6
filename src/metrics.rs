//! Prometheus metrics for ingestion and request latency.
//!
//! This module provides metrics for:
//! - Accepted and rejected readings
//! - The most recently accepted values
//! - HTTP request latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{RejectionReason, Result};
use crate::sensor::Reading;

// === Metric Name Constants ===

/// Accepted readings counter metric name.
pub const METRIC_READINGS_ACCEPTED: &str = "readings_accepted_total";
/// Rejected readings counter metric name.
pub const METRIC_READINGS_REJECTED: &str = "readings_rejected_total";
/// Last accepted temperature gauge metric name.
pub const METRIC_LAST_TEMPERATURE: &str = "last_temperature_celsius";
/// Last accepted humidity gauge metric name.
pub const METRIC_LAST_HUMIDITY: &str = "last_humidity_percent";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the global Prometheus recorder and describe all metrics.
///
/// Call this once at startup; the returned handle renders the exposition text.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_READINGS_ACCEPTED,
        "Total number of readings accepted into the store"
    );
    describe_counter!(
        METRIC_READINGS_REJECTED,
        "Total number of readings rejected by validation"
    );
    describe_gauge!(
        METRIC_LAST_TEMPERATURE,
        "Most recently accepted temperature in degrees Celsius"
    );
    describe_gauge!(
        METRIC_LAST_HUMIDITY,
        "Most recently accepted relative humidity in percent"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Record an accepted reading.
pub fn record_accepted(reading: &Reading) {
    counter!(METRIC_READINGS_ACCEPTED).increment(1);
    gauge!(METRIC_LAST_TEMPERATURE).set(reading.temperature);
    gauge!(METRIC_LAST_HUMIDITY).set(reading.humidity);
}

/// Record a rejected reading, labelled by reason code.
pub fn record_rejected(reason: &RejectionReason) {
    counter!(METRIC_READINGS_REJECTED, "reason" => reason.code()).increment(1);
}

/// RAII guard for timing HTTP requests.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(self.elapsed_ms());
    }
}
