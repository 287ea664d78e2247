//! Response types for the HR engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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
    /// A 400 response for a request that could not be parsed.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Field '{}' failed validation", field),
                ),
            ),
            EngineError::OutOfRange {
                distance_meters,
                radius_meters,
            } => (
                StatusCode::FORBIDDEN,
                ApiError::with_details(
                    "OUT_OF_RANGE",
                    message,
                    format!(
                        "distance_meters={:.1} radius_meters={:.1}",
                        distance_meters, radius_meters
                    ),
                ),
            ),
            EngineError::LocationPermission => (
                StatusCode::FORBIDDEN,
                ApiError::new("LOCATION_PERMISSION_DENIED", message),
            ),
            EngineError::LocationUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("LOCATION_UNAVAILABLE", message),
            ),
            EngineError::LocationTimeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                ApiError::new("LOCATION_TIMEOUT", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            EngineError::AlreadyPunchedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_PUNCHED_IN", message),
            ),
            EngineError::NotPunchedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("NOT_PUNCHED_IN", message),
            ),
            EngineError::UndoWindowExpired { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("UNDO_WINDOW_EXPIRED", message),
            ),
            EngineError::Persistence { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("PERSISTENCE_ERROR", "Storage failed", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
