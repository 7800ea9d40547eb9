//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ogtags_core::error::OgError;

/// API error type. Rendered as a plain-text body with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<OgError> for ApiError {
    fn from(err: OgError) -> Self {
        if err.is_client_error() {
            return match &err {
                OgError::Fetch(e) => {
                    tracing::debug!(error = %e, "Fetch failed");
                    ApiError::bad_request("Can't fetch tags")
                }
                _ => ApiError::bad_request(err.to_string()),
            };
        }

        match &err {
            OgError::Serialization(e) => {
                tracing::error!(error = %e, "Failed to encode tags");
                ApiError::internal("Error encoding JSON")
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("Internal Server Error")
            }
        }
    }
}
