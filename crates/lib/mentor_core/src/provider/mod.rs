//! Completion provider seam.
//!
//! The relay talks to the generative-AI service through [`CompletionService`]
//! so the HTTP client can be swapped for an in-process fake in tests.
//!
//! # Providers
//!
//! - [`gemini::GeminiClient`]: Google Gemini `generateContent` over HTTPS

pub mod gemini;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose};
use serde::Serialize;
use thiserror::Error;

use crate::models::ImageAttachment;

/// Failures reported by a completion provider.
///
/// The `Display` form is what the relay classifies, so provider wording
/// (error reasons, status names) is kept verbatim.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid Gemini endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Gemini request failed: {0}")]
    Transport(String),

    #[error("[{status}] {message}{}", format_reasons(.reasons))]
    Api {
        status: u16,
        message: String,
        reasons: Vec<String>,
    },

    #[error("Gemini response parse error: {0}")]
    Decode(String),

    #[error("Gemini returned no text{}", format_block_reason(.0))]
    EmptyResponse(Option<String>),
}

fn format_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        String::new()
    } else {
        format!(" [{}]", reasons.join(", "))
    }
}

fn format_block_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" (blocked: {r})"))
        .unwrap_or_default()
}

/// Inline binary data attached to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Standard base64 with padding.
    pub data: String,
}

/// One part of a multi-part prompt.
///
/// Serializes as `{"text": ...}` or `{"inlineData": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

impl Part {
    pub fn image(attachment: &ImageAttachment) -> Self {
        Self::InlineData(InlineData {
            mime_type: attachment.mime_type.clone(),
            data: general_purpose::STANDARD.encode(&attachment.data),
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::InlineData(_) => None,
        }
    }
}

/// A prompt ready to be sent: a single text part, optionally followed by an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub parts: Vec<Part>,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
        }
    }

    pub fn with_image(prompt: impl Into<String>, attachment: &ImageAttachment) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into()), Part::image(attachment)],
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.parts.len() > 1
    }

    /// The text prompt, if the first part is text.
    pub fn prompt(&self) -> Option<&str> {
        self.parts.first().and_then(Part::as_text)
    }
}

/// A generative text-completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Whether the service has credentials. Does not probe reachability.
    fn is_configured(&self) -> bool;

    /// Generate text for the request. Exactly one attempt is made.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
