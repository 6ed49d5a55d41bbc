//! HTTP request handlers
//!
//! Shared error type for the API plus the health endpoint.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "DFPWM Converter";

/// HTTP error type
#[derive(Debug)]
pub enum ApiError {
    /// No `file` part carrying a filename
    NoFileUploaded,
    /// `file` part present but its filename is empty
    NoFileSelected,
    /// Body could not be parsed as multipart
    BadRequest(String),
    /// Body exceeded the configured limit
    PayloadTooLarge,
    /// Transcoder failed; carries its diagnostics
    ConversionFailed(String),
    /// Anything else
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NoFileUploaded => {
                (StatusCode::BAD_REQUEST, json!({ "error": "No file uploaded" }))
            }
            ApiError::NoFileSelected => {
                (StatusCode::BAD_REQUEST, json!({ "error": "No file selected" }))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": "Upload too large" }),
            ),
            ApiError::ConversionFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Conversion failed", "details": details }),
            ),
            ApiError::Internal(msg) => {
                // detail stays in the log
                error!(message = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("upload rejected: {}", err.body_text());
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(format!("Malformed upload: {}", err.body_text()))
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(format!("I/O error: {}", err))
    }
}

/// Health check endpoint
/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}
