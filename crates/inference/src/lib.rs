//! Text completion for the Blockwright pipeline
//!
//! This library provides a single `LanguageModel` port over pluggable
//! completion backends:
//! - **OpenAI-compatible**: `/v1/chat/completions` (Ollama, llama.cpp server, LM Studio, OpenAI)
//! - **Gemini**: Google `generateContent`
//!
//! Every call made through the [`InferenceGateway`] is bounded by a deadline.
//! When the deadline passes the in-flight request is dropped and
//! [`InferenceError::Timeout`] is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use inference::{InferenceConfig, InferenceGateway, LanguageModel};
//!
//! let gateway = InferenceGateway::from_config(&InferenceConfig::default())?;
//! let reply = gateway.complete("Say hello").await?;
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod model;
pub mod types;

// Re-exports for convenience
pub use backend::{
    BackendConfig, BackendError, BackendFactory, BackendInfo, BackendRegistry, CompletionBackend,
    GeminiBackend, OpenAiBackend,
};
pub use config::InferenceConfig;
pub use gateway::{InferenceError, InferenceGateway, SharedGateway};
pub use model::LanguageModel;
