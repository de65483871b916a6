//! Conversation history decoding.
//!
//! Clients send `conversationHistory` either as a JSON array of turns or, in
//! multipart forms, as a JSON-encoded string. Whatever the form, a history
//! that fails to decode degrades to an empty one instead of failing the
//! request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::ConversationTurn;

/// Conversation history as it arrives on the wire, decoded lazily so a
/// malformed value never rejects the surrounding request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryInput(Value);

impl HistoryInput {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn into_turns(self) -> Vec<ConversationTurn> {
        history_from_value(self.0)
    }
}

/// Decode a history given as any JSON value: `null`, an array of turns, or a
/// JSON-encoded string of one.
pub fn history_from_value(value: Value) -> Vec<ConversationTurn> {
    match value {
        Value::Null => Vec::new(),
        Value::String(raw) => decode_history(&raw),
        other => match serde_json::from_value::<Vec<ConversationTurn>>(other) {
            Ok(turns) => turns,
            Err(e) => {
                warn!(error = %e, "invalid conversationHistory, using empty history");
                Vec::new()
            }
        },
    }
}

/// Decode a JSON-encoded history, falling back to an empty one.
pub fn decode_history(raw: &str) -> Vec<ConversationTurn> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<ConversationTurn>>(raw) {
        Ok(turns) => turns,
        Err(e) => {
            warn!(error = %e, "failed to parse conversationHistory, using empty history");
            Vec::new()
        }
    }
}
