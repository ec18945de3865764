//! Request-level error taxonomy.

use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Failures that end a request. Chart rendering problems never appear here:
/// they are folded into the chart artifact instead.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("Upstream computation failed: {0}")]
    UpstreamComputationFailure(String),
}

impl ReportError {
    /// HTTP-style status class for the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::MissingField { .. }
            | ReportError::InvalidField { .. }
            | ReportError::InvalidRequest(_)
            | ReportError::InvalidTimestamp { .. } => 400,
            ReportError::UpstreamComputationFailure(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<EphemerisError> for ReportError {
    fn from(err: EphemerisError) -> Self {
        ReportError::UpstreamComputationFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(ReportError::MissingField { field: "hour" }.status_code(), 400);
        assert_eq!(
            ReportError::InvalidTimestamp { value: "yesterday".into() }.status_code(),
            400
        );
        assert!(ReportError::InvalidRequest("x".into()).is_client_error());
    }

    #[test]
    fn upstream_failure_maps_to_500() {
        let err: ReportError = EphemerisError::LocationUnresolved {
            city: "Atlantis".into(),
            nation: "XX".into(),
        }
        .into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn missing_field_message_names_the_key() {
        let err = ReportError::MissingField { field: "minute" };
        assert_eq!(err.to_string(), "Missing required field: minute");
    }
}
