//! # mentor_core
//!
//! Core domain logic for Mentor.
//!
//! - [`catalog`]: the immutable learning-material catalog
//! - [`ranker`]: keyword-overlap ranking over the catalog
//! - [`relay`]: prompt assembly, the completion call, and error classification
//! - [`provider`]: completion service seam and the Gemini client
//! - [`upload`]: image attachment validation

pub mod catalog;
pub mod config;
pub mod history;
pub mod models;
pub mod provider;
pub mod ranker;
pub mod relay;
pub mod upload;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
