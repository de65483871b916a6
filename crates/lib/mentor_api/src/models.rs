//! Request and response bodies for the HTTP API.
//!
//! Field names are camelCase on the wire.

use mentor_core::history::HistoryInput;
use mentor_core::models::MaterialItem;
use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// `POST /api/chat` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChatRequest {
    pub message: Option<String>,
    /// Array of turns, or the same array JSON-encoded as a string.
    pub conversation_history: Option<HistoryInput>,
}

/// `GET /api/recommendations` query string.
///
/// `limit` stays a string so a malformed value is reported as
/// `Invalid limit: <value>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsQuery {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/recommendations` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<MaterialItem>,
    /// Number of matches before `limit` was applied.
    pub total: usize,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gemini_configured: bool,
}
