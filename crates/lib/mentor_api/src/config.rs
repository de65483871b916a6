//! API server configuration.

use mentor_core::config::GeminiConfig;

/// Deployment environment. Controls how much error detail reaches clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Parse `development`/`dev`, `production`/`prod`, or `test`; anything
    /// else is treated as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "test" => Self::Test,
            _ => Self::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether upstream error details may be returned to clients.
    pub fn exposes_details(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:5000").
    pub bind_addr: String,
    pub environment: Environment,
    /// Origins allowed by CORS outside development.
    pub allowed_origins: Vec<String>,
    /// Completion provider settings.
    pub gemini: GeminiConfig,
}

/// Front-end origins allowed when `CORS_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "https://localhost:3000"];

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".into(),
            environment: Environment::default(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable             | Default                                     |
    /// |----------------------|---------------------------------------------|
    /// | `BIND_ADDR`          | `0.0.0.0:$PORT`                             |
    /// | `PORT`               | `5000`                                      |
    /// | `APP_ENV`/`NODE_ENV` | `development`                               |
    /// | `CORS_ORIGINS`       | `http://localhost:3000,https://localhost:3000` (comma-separated) |
    /// | `GEMINI_*`           | see [`GeminiConfig::from_env`]              |
    pub fn from_env() -> Self {
        let port = std::env::var("PORT").unwrap_or_else(|_| "5000".into());
        let environment = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();
        let allowed_origins = std::env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| Self::default().allowed_origins);

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| format!("0.0.0.0:{port}")),
            environment,
            allowed_origins,
            gemini: GeminiConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
