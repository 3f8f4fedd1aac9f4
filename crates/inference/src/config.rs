//! Configuration types for the inference library

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::BackendConfig;
use crate::constants::{backends, defaults, env, timeouts};

/// Serializable inference settings, as stored in the application config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Backend name ("openai" or "gemini")
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Server base URL; falls back to the backend's default host
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model identifier; falls back to the backend's default model
    #[serde(default)]
    pub model: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Deadline for a single completion call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_backend() -> String {
    defaults::BACKEND.to_string()
}

fn default_timeout_secs() -> u64 {
    timeouts::COMPLETION_SECS
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: None,
            model: None,
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

impl InferenceConfig {
    /// Deadline applied to every completion
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Environment variable consulted for the API key
    pub fn api_key_var(&self) -> &str {
        match self.api_key_env.as_deref() {
            Some(var) => var,
            None if self.backend == backends::GEMINI => env::GEMINI_API_KEY,
            None => env::OPENAI_API_KEY,
        }
    }

    /// Resolve defaults and read the API key from the environment
    pub fn to_backend_config(&self) -> BackendConfig {
        let is_gemini = self.backend == backends::GEMINI;
        let base_url = self.base_url.clone().unwrap_or_else(|| {
            if is_gemini {
                defaults::GEMINI_BASE_URL.to_string()
            } else {
                defaults::OPENAI_BASE_URL.to_string()
            }
        });
        let model = self.model.clone().unwrap_or_else(|| {
            if is_gemini {
                defaults::GEMINI_MODEL.to_string()
            } else {
                defaults::OPENAI_MODEL.to_string()
            }
        });
        let api_key = std::env::var(self.api_key_var())
            .ok()
            .filter(|key| !key.trim().is_empty());

        BackendConfig {
            base_url,
            model,
            api_key,
            temperature: self.temperature.unwrap_or(defaults::TEMPERATURE),
        }
    }
}
