//! Unified error types for the sensor feed service.

use strum::IntoStaticStr;
use thiserror::Error;

use crate::sensor::Field;

/// Unified error type for the service process.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a submitted reading was rejected.
///
/// Every variant is a client-input error. None of them ever reaches the
/// observation store.
#[derive(Error, Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectionReason {
    /// No payload supplied, or the payload was empty.
    #[error("no JSON body supplied")]
    MissingBody,

    /// A body was sent but is not valid JSON. Reported under the
    /// `missing_body` code since no usable payload arrived.
    #[error("request body is not valid JSON: {detail}")]
    #[strum(serialize = "missing_body")]
    MalformedBody {
        /// Parser error.
        detail: String,
    },

    /// One or both required fields are absent.
    #[error("missing required field(s): {}", join_fields(.missing))]
    MissingFields {
        /// The absent fields, temperature first.
        missing: Vec<Field>,
    },

    /// A field is present but not numeric.
    #[error("{field} must be a number")]
    TypeError {
        /// The offending field.
        field: Field,
    },

    /// A field is numeric but outside its valid envelope.
    #[error("{field} {value} is outside the valid range [{min}, {max}]")]
    RangeError {
        /// The offending field.
        field: Field,
        /// The submitted value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl RejectionReason {
    /// Stable machine-readable code, e.g. `range_error`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// The field this rejection is about, if it names exactly one.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::TypeError { field } | Self::RangeError { field, .. } => Some(*field),
            Self::MissingFields { missing } if missing.len() == 1 => Some(missing[0]),
            _ => None,
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(RejectionReason::MissingBody.code(), "missing_body");
        assert_eq!(
            RejectionReason::MalformedBody {
                detail: "EOF while parsing an object".to_string()
            }
            .code(),
            "missing_body"
        );
        assert_eq!(
            RejectionReason::TypeError {
                field: Field::Humidity
            }
            .code(),
            "type_error"
        );
    }

    #[test]
    fn messages_name_the_field() {
        let reason = RejectionReason::MissingFields {
            missing: vec![Field::Temperature, Field::Humidity],
        };
        assert_eq!(
            reason.to_string(),
            "missing required field(s): temperature, humidity"
        );

        let reason = RejectionReason::RangeError {
            field: Field::Temperature,
            value: -50.0,
            min: -40.0,
            max: 85.0,
        };
        assert_eq!(
            reason.to_string(),
            "temperature -50 is outside the valid range [-40, 85]"
        );
        assert_eq!(reason.field(), Some(Field::Temperature));
    }

    #[test]
    fn malformed_body_message_differs_from_missing_body() {
        let reason = RejectionReason::MalformedBody {
            detail: "number out of range at line 1 column 22".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "request body is not valid JSON: number out of range at line 1 column 22"
        );
        assert_ne!(reason.to_string(), RejectionReason::MissingBody.to_string());
        assert_eq!(reason.field(), None);
    }
}
