use crate::error::ReportError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope. `status` is the HTTP-style code of the outcome and is not
/// part of the serialized body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip)]
    pub status: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

fn now() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            status: 200,
            success: true,
            data: Some(data),
            error: None,
            timestamp: now(),
        }
    }

    pub fn failure(err: &ReportError) -> Self {
        Self {
            status: err.status_code(),
            success: false,
            data: None,
            error: Some(err.to_string()),
            timestamp: now(),
        }
    }

    /// Serializes a report; a report that cannot be serialized is an internal failure.
    pub fn from_report<T: Serialize>(result: Result<T, ReportError>) -> Self {
        let value = result.and_then(|report| {
            serde_json::to_value(report).map_err(|e| ReportError::UpstreamComputationFailure(e.to_string()))
        });
        match value {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failure(&err),
        }
    }
}
