//! Chat relay: forwards a chat turn to the completion service and merges the
//! reply with ranked learning materials.
//!
//! Flow per request:
//! 1. Require a message or an image
//! 2. Require a configured completion service
//! 3. Assemble the prompt (text-only or `[text, image]`)
//! 4. Make exactly one completion call
//! 5. Rank materials against the message, or `"image analysis"` for image-only turns
//!
//! Provider failures are classified by their message text into config, quota,
//! and generic upstream errors.

pub mod prompt;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::{error, info};

use crate::config::GeminiConfig;
use crate::models::{ChatResult, ConversationTurn, ImageAttachment};
use crate::provider::gemini::GeminiClient;
use crate::provider::{CompletionError, CompletionService};
use crate::ranker::{DEFAULT_LIMIT, Ranker};

/// Ranking query used when only an image was supplied.
pub const IMAGE_ONLY_QUERY: &str = "image analysis";

/// Errors returned by [`ChatRelay::converse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Caller input is insufficient.
    #[error("{0}")]
    Validation(String),

    /// No credential is configured for the completion service.
    #[error("AI service not configured")]
    NotConfigured,

    /// The provider rejected the credential or the deployment is misconfigured.
    #[error("AI service configuration error: {0}")]
    Misconfigured(String),

    /// Provider rate or budget exhausted; the caller may retry later.
    #[error("AI service quota exceeded: {0}")]
    Quota(String),

    /// Any other provider failure, with the provider's message.
    #[error("{0}")]
    Upstream(String),
}

impl RelayError {
    /// Whether this is a deployment problem rather than a caller or provider one.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::Misconfigured(_))
    }
}

/// Classify a provider failure message.
///
/// `API_KEY` wins over `quota`/`limit`; matching is case-sensitive.
pub fn classify(message: &str) -> RelayError {
    if message.contains("API_KEY") {
        RelayError::Misconfigured(message.to_string())
    } else if message.contains("quota") || message.contains("limit") {
        RelayError::Quota(message.to_string())
    } else {
        RelayError::Upstream(message.to_string())
    }
}

impl From<CompletionError> for RelayError {
    fn from(e: CompletionError) -> Self {
        classify(&e.to_string())
    }
}

/// First `max` characters of `text` followed by `...`, for log lines.
pub fn preview(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Stateless chat relay. Cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct ChatRelay {
    provider: Arc<dyn CompletionService>,
    ranker: Ranker,
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay")
            .field("configured", &self.provider.is_configured())
            .field("catalog_len", &self.ranker.catalog().len())
            .finish()
    }
}

impl ChatRelay {
    /// Relay backed by the Gemini client built from `config`.
    pub fn new(config: &GeminiConfig, ranker: Ranker) -> Result<Self, CompletionError> {
        let client = GeminiClient::new(config)?;
        Ok(Self::with_provider(Arc::new(client), ranker))
    }

    /// Relay backed by an arbitrary completion service.
    pub fn with_provider(provider: Arc<dyn CompletionService>, ranker: Ranker) -> Self {
        Self { provider, ranker }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Run one chat turn. An empty `message` counts as absent.
    pub async fn converse(
        &self,
        message: Option<&str>,
        history: &[ConversationTurn],
        image: Option<&ImageAttachment>,
    ) -> Result<ChatResult, RelayError> {
        let message = message.filter(|m| !m.is_empty());
        if message.is_none() && image.is_none() {
            return Err(RelayError::Validation(
                "Message or image is required".to_string(),
            ));
        }

        if !self.provider.is_configured() {
            error!("Gemini API key not configured");
            return Err(RelayError::NotConfigured);
        }

        let request = prompt::build_request(message, history, image);

        info!(
            multipart = request.is_multipart(),
            history_len = history.len(),
            "sending request to Gemini API"
        );
        let response = self.provider.complete(&request).await.map_err(|e| {
            error!(error = %e, "completion request failed");
            RelayError::from(e)
        })?;
        info!(preview = %preview(&response, 100), "received response from Gemini API");

        let query = message.unwrap_or(IMAGE_ONLY_QUERY);
        let recommendations = self.ranker.rank_scored(query, DEFAULT_LIMIT);

        Ok(ChatResult {
            response,
            recommendations,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
