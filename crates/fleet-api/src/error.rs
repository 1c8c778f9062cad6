//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fleet_core::{CallFailure, FailureKind};
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found (gateway route missing)
    NotFound(String),
    /// 504 Gateway Timeout - backend did not answer in time
    Timeout(String),
    /// 503 Service Unavailable - backend could not be reached
    ConnectionRefused(String),
    /// Backend answered with a non-2xx status; the status is propagated
    Upstream { status: u16, message: String },
    /// 500 Internal Server Error
    Unknown(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, "timeout", msg),
            ApiError::ConnectionRefused(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "connection_refused", msg)
            }
            ApiError::Upstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "upstream_error",
                message,
            ),
            ApiError::Unknown(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "unknown", msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, status = status.as_u16(), %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, status = status.as_u16(), %message, "API client error");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<CallFailure> for ApiError {
    fn from(failure: CallFailure) -> Self {
        match failure.kind {
            FailureKind::Timeout => ApiError::Timeout(failure.message),
            FailureKind::ConnectionRefused => ApiError::ConnectionRefused(failure.message),
            FailureKind::Upstream { status, .. } => ApiError::Upstream {
                status,
                message: failure.message,
            },
            FailureKind::Unknown => ApiError::Unknown(failure.message),
        }
    }
}
