//! The language model port consumed by the pipeline

use std::sync::Arc;

use async_trait::async_trait;

use crate::gateway::InferenceError;

/// A single-shot text completion service.
///
/// Implementations take an opaque prompt and return the raw response text.
/// Failures (network, service or deadline) are returned as errors; callers
/// decide whether they are fatal.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete the prompt and return the response text
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[async_trait]
impl<T: LanguageModel + ?Sized> LanguageModel for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        (**self).complete(prompt).await
    }
}
