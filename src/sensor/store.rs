//! Process-wide observation state.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::debug;

use super::types::{ConnectivityStatus, Reading};

/// A reading together with the instant it was accepted.
///
/// Stored as one value so the pair is always replaced as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The accepted reading.
    pub reading: Reading,
    /// When it was accepted.
    pub updated_at: OffsetDateTime,
}

/// Consistent point-in-time view of the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationSnapshot {
    /// Latest observation, if any reading has been accepted.
    pub observation: Option<Observation>,
    /// Process start time.
    pub started_at: OffsetDateTime,
}

impl ObservationSnapshot {
    /// Latest accepted reading.
    pub fn reading(&self) -> Option<Reading> {
        self.observation.map(|o| o.reading)
    }

    /// When the latest reading was accepted.
    pub fn last_update(&self) -> Option<OffsetDateTime> {
        self.observation.map(|o| o.updated_at)
    }

    /// Connectivity status as of `now`.
    pub fn status(&self, now: OffsetDateTime) -> ConnectivityStatus {
        ConnectivityStatus::evaluate(self.last_update(), now)
    }

    /// Seconds elapsed since the last update, if there was one.
    pub fn seconds_since_update(&self, now: OffsetDateTime) -> Option<f64> {
        self.last_update().map(|at| non_negative(now - at))
    }

    /// Seconds elapsed since the process started.
    pub fn uptime_seconds(&self, now: OffsetDateTime) -> f64 {
        non_negative(now - self.started_at)
    }
}

fn non_negative(elapsed: Duration) -> f64 {
    elapsed.max(Duration::ZERO).as_seconds_f64()
}

/// Lock-guarded holder of the latest observation.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct ObservationStore {
    latest: Arc<RwLock<Option<Observation>>>,
    started_at: OffsetDateTime,
}

impl ObservationStore {
    /// Create an empty store for a process started at `started_at`.
    pub fn new(started_at: OffsetDateTime) -> Self {
        Self {
            latest: Arc::new(RwLock::new(None)),
            started_at,
        }
    }

    /// Process start time.
    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// Replace the latest reading and its timestamp in one step.
    ///
    /// Timestamps earlier than the process start are clamped to it.
    pub async fn write(&self, reading: Reading, at: OffsetDateTime) -> Observation {
        let observation = Observation {
            reading,
            updated_at: at.max(self.started_at),
        };
        *self.latest.write().await = Some(observation);
        debug!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            "Observation replaced"
        );
        observation
    }

    /// Consistent snapshot of the current state.
    pub async fn read(&self) -> ObservationSnapshot {
        ObservationSnapshot {
            observation: *self.latest.read().await,
            started_at: self.started_at,
        }
    }
}
