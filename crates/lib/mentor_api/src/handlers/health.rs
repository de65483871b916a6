//! Health probe.

use axum::Json;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health`: liveness plus whether the AI credential is present.
///
/// Does not contact the provider.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        gemini_configured: state.relay.is_configured(),
    })
}
