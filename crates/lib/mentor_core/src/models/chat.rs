//! Chat request and response models.

use serde::{Deserialize, Serialize};

use super::material::ScoredMaterial;

/// One prior message in a conversation, e.g. `{"role": "user", "content": "hi"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A validated image upload ready to be forwarded to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Response envelope for both chat endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    /// Text generated by the completion service.
    pub response: String,
    /// Ranked learning materials, best match first.
    pub recommendations: Vec<ScoredMaterial>,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}
