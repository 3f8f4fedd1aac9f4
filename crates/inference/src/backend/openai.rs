//! OpenAI-compatible backend implementation
//!
//! Talks to any server exposing `/v1/chat/completions`: Ollama, the llama.cpp
//! server, LM Studio or OpenAI itself. Requests are non-streaming; the first
//! choice's message content is the completion.

use async_trait::async_trait;

use super::{api_error, BackendConfig, BackendError, CompletionBackend};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// OpenAI-compatible chat completions backend
pub struct OpenAiBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Base URL of the server (no trailing `/v1`)
    base_url: String,
    /// Model name sent with every request
    model: String,
    /// Bearer token, if the server needs one
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiBackend {
    /// Create a new backend from resolved configuration
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }


    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            stream: false,
            max_tokens: None,
            temperature: Some(self.temperature),
        };

        let mut builder = self.http_client.post(self.completions_url()).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Inference(format!("Failed to parse response: {}", e)))?;

        log::debug!("openai: {} choice(s) returned", body.choices.len());

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyResponse("openai"))
    }
}
