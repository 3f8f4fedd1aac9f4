//! Gemini backend implementation
//!
//! Calls `models/{model}:generateContent` on the Generative Language API.
//! The API key travels in the `x-goog-api-key` header.

use async_trait::async_trait;

use super::{api_error, BackendConfig, BackendError, CompletionBackend};
use crate::types::{
    GeminiContent, GeminiPart, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};

const X_GOOG_API_KEY: &str = "x-goog-api-key";

/// Google Gemini backend
pub struct GeminiBackend {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiBackend {
    /// Create a new backend; Gemini always needs an API key
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BackendError::Config("Gemini backend requires an API key".to_string()))?;

        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }


    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.temperature,
            }),
        };

        let response = self
            .http_client
            .post(self.generate_url())
            .header(X_GOOG_API_KEY, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Inference(format!("Failed to parse response: {}", e)))?;

        body.first_text()
            .ok_or(BackendError::EmptyResponse("gemini"))
    }
}
