//! Pluggable completion backend abstraction
//!
//! This module provides a trait-based abstraction over the HTTP services that
//! can answer a prompt (OpenAI-compatible servers, Gemini). All backends
//! implement the same interface, so the configured one is picked by name at
//! startup.

pub mod gemini;
pub mod openai;
pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;
pub use registry::{BackendFactory, BackendRegistry};

/// Error types for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Empty completion returned by {0}")]
    EmptyResponse(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Backend information for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend identifier used in configuration (e.g., "openai", "gemini")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether the backend needs an API key to be usable
    pub requires_api_key: bool,
}

/// Resolved configuration for constructing a backend
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Server base URL, without the API path
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key, if any
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
}

/// The core trait that all completion backends must implement.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Identifier used in configuration and logs
    fn name(&self) -> &'static str;

    /// Send one prompt as a user message and return the response text
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Read an error body for an unsuccessful response
pub(crate) async fn api_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Api { status, body }
}
