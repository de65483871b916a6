//! Catch-all for unknown routes.

use axum::http::Uri;

use crate::error::AppError;

/// Any unmatched path.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(%uri, "no route");
    AppError::NotFound("Endpoint not found".into())
}
