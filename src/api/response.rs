//! Response types for the Xtrack API.
//!
//! This module defines the error response structures, the `{ "data": ... }`
//! envelope used by most list endpoints, and the mapping from
//! [`XtrackError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::XtrackError;
use crate::models::{AttendanceRecord, AttendanceStatus, LeaveRequest};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<XtrackError> for ApiErrorResponse {
    fn from(error: XtrackError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            XtrackError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", path),
            ),
            XtrackError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            XtrackError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
            XtrackError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            XtrackError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    "Only pending leave requests can change status",
                ),
            ),
            XtrackError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
            XtrackError::Unauthorized { .. } => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
            }
            XtrackError::DuplicateAttendance { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_ATTENDANCE", message),
            ),
            XtrackError::Network { .. } | XtrackError::Rejected { .. } => {
                (StatusCode::BAD_GATEWAY, ApiError::new("UPSTREAM_ERROR", message))
            }
            XtrackError::TokenStore { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", message),
            ),
            XtrackError::CalculationError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// The `{ "data": ... }` wrapper around list and item responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// The payload.
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Wraps `data`.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A leave request as listed to admins, with the requester's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveView {
    /// The leave request.
    #[serde(flatten)]
    pub leave: LeaveRequest,
    /// Display name of the requesting employee, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

/// An attendance record with its derived display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    /// The attendance record.
    #[serde(flatten)]
    pub record: AttendanceRecord,
    /// Display name of the employee, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Checked in or out.
    pub status: AttendanceStatus,
    /// `total_hours` as `Hh Mm`.
    pub formatted_hours: String,
}

impl AttendanceView {
    /// Builds the view of `record`.
    pub fn new(record: AttendanceRecord, employee_name: Option<String>) -> Self {
        Self {
            status: record.status(),
            formatted_hours: record.formatted_hours(),
            record,
            employee_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveStatus;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_status_codes_by_error_kind() {
        let cases = vec![
            (XtrackError::validation("reason", "must not be blank"), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (XtrackError::not_found("holiday", 3), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                XtrackError::InvalidTransition {
                    id: 1,
                    from: LeaveStatus::Approved,
                    to: LeaveStatus::Cancelled,
                },
                StatusCode::CONFLICT,
                "INVALID_TRANSITION",
            ),
            (
                XtrackError::Forbidden { message: "admin only".to_string() },
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                XtrackError::Unauthorized { message: "missing token".to_string() },
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                XtrackError::CalculationError { message: "no days".to_string() },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CALCULATION_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_validation_error_names_the_field() {
        let response: ApiErrorResponse = XtrackError::validation("endDate", "before start").into();
        assert_eq!(response.error.details.as_deref(), Some("endDate"));
        assert!(response.error.message.contains("endDate"));
    }

    #[test]
    fn test_data_envelope_shape() {
        let json = serde_json::to_value(DataEnvelope::new(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2] }));
    }
}
