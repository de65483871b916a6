//! # mentor_api
//!
//! HTTP API library for Mentor.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use mentor_core::relay::ChatRelay;
use mentor_core::upload::UploadPolicy;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{chat, fallback, health, recommendations};

/// Largest accepted request body (JSON or multipart).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Chat relay; also owns the ranker and catalog.
    pub relay: Arc<ChatRelay>,
    /// Image attachment constraints.
    pub upload_policy: UploadPolicy,
}

impl AppState {
    pub fn new(config: ApiConfig, relay: ChatRelay) -> Self {
        Self {
            config,
            relay: Arc::new(relay),
            upload_policy: UploadPolicy::default(),
        }
    }
}

/// CORS: any origin outside production, the configured list in production.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.environment.is_production() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    } else {
        AllowOrigin::mirror_request()
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .route(routes::POST_API_CHAT_IMAGE, post(chat::image_chat_handler))
        .route(
            routes::GET_API_RECOMMENDATIONS,
            get(recommendations::list_handler),
        )
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .fallback(fallback::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
