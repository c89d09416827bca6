//! Validation of raw inbound reading payloads.

use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::instrument;

use super::types::{Field, Reading};
use crate::error::RejectionReason;

/// Accepted temperature envelope in °C.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -40.0..=85.0;

/// Accepted relative humidity envelope in %.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Validate a raw payload into a [`Reading`].
///
/// Checks run in a fixed order and stop at the first failure: presence of a
/// body, presence of both fields, numeric type, temperature range, then
/// humidity range. Numeric strings are rejected.
#[instrument(level = "debug", skip_all)]
pub fn validate(raw: Option<&Value>) -> Result<Reading, RejectionReason> {
    let object = match raw {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(RejectionReason::MissingBody),
    };

    let missing: Vec<Field> = [Field::Temperature, Field::Humidity]
        .into_iter()
        .filter(|f| !object.contains_key(f.key()))
        .collect();
    if !missing.is_empty() {
        return Err(RejectionReason::MissingFields { missing });
    }

    let temperature = numeric(object.get(Field::Temperature.key()), Field::Temperature)?;
    let humidity = numeric(object.get(Field::Humidity.key()), Field::Humidity)?;

    check_range(temperature, Field::Temperature, &TEMPERATURE_RANGE)?;
    check_range(humidity, Field::Humidity, &HUMIDITY_RANGE)?;

    Ok(Reading::new(temperature, humidity))
}

fn numeric(value: Option<&Value>, field: Field) -> Result<f64, RejectionReason> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(RejectionReason::TypeError { field }),
        _ => Err(RejectionReason::TypeError { field }),
    }
}

fn check_range(
    value: f64,
    field: Field,
    range: &RangeInclusive<f64>,
) -> Result<(), RejectionReason> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(RejectionReason::RangeError {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
