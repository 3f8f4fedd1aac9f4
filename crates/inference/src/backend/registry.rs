//! Backend registry for runtime backend discovery and instantiation
//!
//! The registry maps configuration names to factories, so the gateway can
//! build whichever backend the application config asks for.

use std::collections::HashMap;

use super::{BackendConfig, BackendError, BackendInfo, CompletionBackend, GeminiBackend, OpenAiBackend};
use crate::constants::backends;

/// Factory trait for creating backend instances
pub trait BackendFactory: Send + Sync {
    /// Create a new backend instance
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn CompletionBackend>, BackendError>;

    /// Get information about this backend
    fn info(&self) -> BackendInfo;
}

/// Factory for OpenAI-compatible servers
pub struct OpenAiFactory;

impl BackendFactory for OpenAiFactory {
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn CompletionBackend>, BackendError> {
        Ok(Box::new(OpenAiBackend::new(config)))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: backends::OPENAI.to_string(),
            description: "OpenAI-compatible /v1/chat/completions server".to_string(),
            requires_api_key: false,
        }
    }
}

/// Factory for Gemini
pub struct GeminiFactory;

impl BackendFactory for GeminiFactory {
    fn create(&self, config: &BackendConfig) -> Result<Box<dyn CompletionBackend>, BackendError> {
        Ok(Box::new(GeminiBackend::new(config)?))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: backends::GEMINI.to_string(),
            description: "Google Gemini generateContent API".to_string(),
            requires_api_key: true,
        }
    }
}

/// Registry of available completion backends
pub struct BackendRegistry {
    factories: HashMap<String, Box<dyn BackendFactory>>,
}

impl BackendRegistry {
    /// Create a new registry with all built-in backends registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(backends::OPENAI, Box::new(OpenAiFactory));
        registry.register(backends::GEMINI, Box::new(GeminiFactory));

        registry
    }

    /// Register a backend factory
    pub fn register(&mut self, name: &str, factory: Box<dyn BackendFactory>) {
        self.factories.insert(name.to_string(), factory);
    }

    /// List all available backend names, sorted
    pub fn available_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get information about all registered backends
    pub fn list(&self) -> Vec<BackendInfo> {
        let mut infos: Vec<BackendInfo> = self.factories.values().map(|f| f.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Create a backend instance by name
    pub fn create(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<Box<dyn CompletionBackend>, BackendError> {
        self.factories
            .get(name)
            .ok_or_else(|| BackendError::Config(format!("Unknown backend: {}", name)))?
            .create(config)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
