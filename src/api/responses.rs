//! Wire shapes returned by the HTTP API.
//!
//! Each response is assembled from an [`ObservationSnapshot`] (or a freshly
//! written [`Observation`]) plus the current time. Absent values serialize as
//! `null`; timestamps serialize as RFC 3339.

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::RejectionReason;
use crate::sensor::{ConnectivityStatus, Field, Observation, ObservationSnapshot, Reading};

/// Response to a successful reading submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitResponse {
    /// Always "success".
    pub status: &'static str,
    /// Connectivity status right after the write.
    pub connection_status: ConnectivityStatus,
    /// The stored reading.
    pub data: Reading,
    /// When the reading was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
}

impl SubmitResponse {
    /// Assemble from the observation just written.
    pub fn assemble(observation: &Observation, now: OffsetDateTime) -> Self {
        Self {
            status: "success",
            connection_status: ConnectivityStatus::evaluate(Some(observation.updated_at), now),
            data: observation.reading,
            last_update: observation.updated_at,
        }
    }
}

/// Current snapshot response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotResponse {
    /// Latest temperature in °C.
    pub temperature: Option<f64>,
    /// Latest relative humidity in %.
    pub humidity: Option<f64>,
    /// When the latest reading was accepted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_update: Option<OffsetDateTime>,
    /// Derived connectivity status.
    pub connection_status: ConnectivityStatus,
}

impl SnapshotResponse {
    /// Assemble from a store snapshot.
    pub fn assemble(snapshot: &ObservationSnapshot, now: OffsetDateTime) -> Self {
        let reading = snapshot.reading();
        Self {
            temperature: reading.map(|r| r.temperature),
            humidity: reading.map(|r| r.humidity),
            last_update: snapshot.last_update(),
            connection_status: snapshot.status(now),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    /// Service status: "ok".
    pub status: &'static str,
    /// Derived connectivity status of the sensor feed.
    pub connection_status: ConnectivityStatus,
    /// Latest reading.
    pub data: Option<Reading>,
    /// When the latest reading was accepted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_update: Option<OffsetDateTime>,
    /// Seconds since the latest reading was accepted.
    pub seconds_since_update: Option<f64>,
    /// Seconds since the process started.
    pub uptime_seconds: f64,
}

impl HealthResponse {
    /// Assemble from a store snapshot.
    pub fn assemble(snapshot: &ObservationSnapshot, now: OffsetDateTime) -> Self {
        Self {
            status: "ok",
            connection_status: snapshot.status(now),
            data: snapshot.reading(),
            last_update: snapshot.last_update(),
            seconds_since_update: snapshot.seconds_since_update(now),
            uptime_seconds: snapshot.uptime_seconds(now),
        }
    }
}

/// Rejected submission response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Always "error".
    pub status: &'static str,
    /// Machine-readable reason code.
    pub error: &'static str,
    /// Human-readable reason.
    pub message: String,
    /// Offending field, when the reason names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl From<&RejectionReason> for ErrorResponse {
    fn from(reason: &RejectionReason) -> Self {
        Self {
            status: "error",
            error: reason.code(),
            message: reason.to_string(),
            field: reason.field(),
        }
    }
}
