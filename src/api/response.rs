//! Response types for the Punch Payroll Engine API.
//!
//! This module defines the success and error response bodies for the HTTP
//! API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::diagnostics::Diagnostic;
use crate::error::PayrollError;
use crate::models::PayrollResult;

/// Body returned by `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Identifier of the request, also present in the server logs.
    pub correlation_id: Uuid,
    /// One entry per successfully processed employee, in input order.
    pub results: Vec<PayrollResult>,
    /// Problems recovered from during the run, in the order they occurred.
    pub diagnostics: Vec<DiagnosticEntry>,
}

/// A diagnostic as rendered in an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// When the problem was observed.
    pub timestamp: DateTime<Local>,
    /// Machine-readable code, e.g. `UNKNOWN_JOB`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            timestamp: diagnostic.timestamp,
            code: diagnostic.kind.code().to_string(),
            message: diagnostic.message(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::with_details(
            "MALFORMED_JSON",
            message,
            "The request body must be a payroll document with jobMeta and employeeData lists",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        match error {
            PayrollError::InputParseError { message, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::malformed_json(message),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_parse_error_maps_to_bad_request() {
        let response: ApiErrorResponse = PayrollError::InputParseError {
            source_name: "request body".to_string(),
            message: "EOF while parsing".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "MALFORMED_JSON");
        assert_eq!(response.error.message, "EOF while parsing");
        assert!(response.error.details.is_some());
    }

    #[test]
    fn test_other_errors_map_to_internal_error() {
        let response: ApiErrorResponse = PayrollError::DiagnosticLog {
            path: "ErrorLog.txt".to_string(),
            message: "denied".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = ApiErrorResponse::from(PayrollError::InputParseError {
            source_name: "request body".to_string(),
            message: "EOF while parsing".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_diagnostic_entry_from_diagnostic() {
        let diagnostic = Diagnostic::new(DiagnosticKind::UnknownJob {
            employee_id: "Mike".to_string(),
            job_id: "Roofer".to_string(),
        });

        let entry = DiagnosticEntry::from(&diagnostic);
        assert_eq!(entry.code, "UNKNOWN_JOB");
        assert_eq!(entry.timestamp, diagnostic.timestamp);
        assert!(entry.message.starts_with("For employee Mike"));
    }
}
