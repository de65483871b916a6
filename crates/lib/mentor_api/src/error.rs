//! Application error types.

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mentor_core::relay::RelayError;
use mentor_core::upload::UploadError;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("AI service not configured")]
    NotConfigured,

    #[error("AI service configuration error: {0}")]
    Misconfigured(String),

    #[error("AI quota exceeded: {0}")]
    Quota(String),

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        /// Diagnostic detail, only populated outside production.
        details: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Convert a relay error, attaching diagnostic details when allowed.
    pub fn from_relay(e: RelayError, expose_details: bool) -> Self {
        let details = expose_details.then(|| format!("{e:?}"));
        match e {
            RelayError::Validation(m) => AppError::Validation(m),
            RelayError::NotConfigured => AppError::NotConfigured,
            RelayError::Misconfigured(m) => AppError::Misconfigured(m),
            RelayError::Quota(m) => AppError::Quota(m),
            RelayError::Upstream(message) => AppError::Upstream { message, details },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::Quota(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotConfigured
            | AppError::Misconfigured(_)
            | AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing envelope. Provider and internal messages are replaced
    /// with fixed text except for generic upstream failures.
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            AppError::Validation(m) | AppError::NotFound(m) => ErrorResponse::new(m),
            AppError::Upload(e) => ErrorResponse::new(e.to_string()),
            AppError::NotConfigured => ErrorResponse::new("AI service not configured"),
            AppError::Misconfigured(_) => ErrorResponse::new("AI service configuration error")
                .with_message("Please check API key configuration"),
            AppError::Quota(_) => ErrorResponse::new("Service temporarily unavailable")
                .with_message("API quota exceeded, please try again later"),
            AppError::Upstream { message, details } => {
                let mut body =
                    ErrorResponse::new("Failed to generate response").with_message(message);
                body.details = details.clone();
                body
            }
        }
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::from_relay(e, false)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::Upload(UploadError::TooLarge {
                limit: mentor_core::upload::MAX_IMAGE_BYTES,
            })
        } else {
            AppError::Validation(e.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            warn!(%status, error = %self, "request rejected");
        }
        (status, Json(self.to_body())).into_response()
    }
}
