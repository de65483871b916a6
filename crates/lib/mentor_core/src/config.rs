//! Completion provider configuration.

use std::env;
use std::time::Duration;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Upper bound on a single completion call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved settings for the Gemini completion service.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API key; `None` means the service is not configured.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Config with the given key and default model, URL, and timeout.
    /// An empty key is treated as unset.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                                      |
    /// |--------------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`         | unset                                        |
    /// | `GEMINI_MODEL`           | `gemini-2.0-flash`                           |
    /// | `GEMINI_BASE_URL`        | `https://generativelanguage.googleapis.com`  |
    /// | `GEMINI_TIMEOUT_SECS`    | `120`                                        |
    pub fn from_env() -> Self {
        let mut config = Self::new(env::var("GEMINI_API_KEY").ok());
        if let Ok(model) = env::var("GEMINI_MODEL")
            && !model.trim().is_empty()
        {
            config.model = model;
        }
        if let Ok(url) = env::var("GEMINI_BASE_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }
        if let Some(secs) = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Whether an API key is present. Says nothing about provider reachability.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
