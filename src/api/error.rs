//! HTTP mapping of service errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::StsError;

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl StsError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            StsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            StsError::Unauthorized | StsError::JwtDecodingError(_) => StatusCode::UNAUTHORIZED,
            StsError::KeyNotFound { .. }
            | StsError::InvalidKeyFormat(_)
            | StsError::SigningFailure(_)
            | StsError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to a caller. Server-side failures are collapsed
    /// so key material and paths never leave the process.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            StsError::InvalidInput(detail) => format!("Invalid request body: {}", detail),
            StsError::Unauthorized => "Invalid credentials".to_string(),
            StsError::JwtDecodingError(_) => "Invalid token".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for StsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
