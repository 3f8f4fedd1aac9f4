//! Inference Gateway - Single entry point for all completion calls
//!
//! The gateway owns the configured backend, applies the deadline to every
//! call and exposes the result through the [`LanguageModel`] port.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::backend::{BackendError, BackendRegistry, CompletionBackend};
use crate::config::InferenceConfig;
use crate::model::LanguageModel;

/// Error types for completion calls
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),
}

/// The single entry point for ALL completion calls.
///
/// Application code should only interact with InferenceGateway, never
/// with backends directly.
pub struct InferenceGateway {
    backend: Box<dyn CompletionBackend>,
    /// Deadline applied to each completion
    timeout: Duration,
}

impl InferenceGateway {
    /// Create a gateway around an already constructed backend
    pub fn with_backend(backend: Box<dyn CompletionBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Build the backend named in the configuration
    ///
    /// A zero deadline would fail every call that is not immediately ready,
    /// so it is rejected as a configuration error.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        if config.timeout_secs == 0 {
            return Err(BackendError::Config("timeout_secs must be greater than zero".to_string()).into());
        }

        let backend = BackendRegistry::new().create(&config.backend, &config.to_backend_config())?;
        log::info!(
            "Inference gateway using backend '{}' (timeout {:?})",
            backend.name(),
            config.timeout()
        );

        Ok(Self::with_backend(backend, config.timeout()))
    }
}

#[async_trait]
impl LanguageModel for InferenceGateway {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let backend = &self.backend;
        let started = Instant::now();

        // Dropping the request future at the deadline cancels the HTTP call.
        let result = tokio::time::timeout(self.timeout, backend.complete(prompt)).await;

        match result {
            Ok(Ok(text)) => {
                log::debug!(
                    "{} completion finished in {}ms ({} chars)",
                    backend.name(),
                    started.elapsed().as_millis(),
                    text.len()
                );
                Ok(text)
            }
            Ok(Err(e)) => {
                log::warn!("{} completion failed: {}", backend.name(), e);
                Err(InferenceError::Backend(e))
            }
            Err(_) => {
                log::warn!("{} completion timed out after {:?}", backend.name(), self.timeout);
                Err(InferenceError::Timeout(self.timeout))
            }
        }
    }
}

/// Shared gateway type for application state
pub type SharedGateway = Arc<InferenceGateway>;
