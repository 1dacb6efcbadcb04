//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable reason code
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Reason codes shared by the API and its clients
pub mod error_codes {
    pub const ID_NOT_PRESENT: &str = "idnotpresent";
    pub const ID_EXISTS: &str = "idexists";
    pub const ID_NOT_FOUND: &str = "idnotfound";
    pub const INVALID_PHONE: &str = "invalidPhone";
    pub const INVALID_DEVICE_ID: &str = "invalidDeviceId";
    pub const ALREADY_CONFIRMED: &str = "alreadyConfirmed";
    pub const CODE_EXPIRED: &str = "codeExpired";
    pub const CODE_MISMATCH: &str = "codeMisMatch";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let response = ErrorResponse::new(error_codes::CODE_EXPIRED, "Code expired, request another")
            .add_detail("driverId", "d1");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "codeExpired");
        assert_eq!(json["details"]["driverId"], "d1");
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("x", "y")).unwrap();
        assert!(json.get("details").is_none());
    }
}
