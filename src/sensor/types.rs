//! Sensor feed domain types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// One accepted temperature/humidity observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
}

impl Reading {
    /// Create a new reading.
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// A named field of an inbound reading payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// `temperature` key.
    Temperature,
    /// `humidity` key.
    Humidity,
}

impl Field {
    /// JSON key of this field.
    pub fn key(&self) -> &'static str {
        self.into()
    }
}

/// Freshness of the last accepted reading.
///
/// Derived on every read, never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectivityStatus {
    /// No reading ever, or the last one is older than the stale window.
    Offline,
    /// Last reading is older than the connected window.
    Stale,
    /// Last reading is recent.
    Connected,
}
