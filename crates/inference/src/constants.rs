//! Inference defaults
//!
//! Single source of truth for backend names, endpoints and timeouts.

/// Registered backend names
pub mod backends {
    /// OpenAI-compatible chat completions
    pub const OPENAI: &str = "openai";
    /// Google Gemini `generateContent`
    pub const GEMINI: &str = "gemini";
}

/// Default values for inference configuration
pub mod defaults {
    /// Default backend
    pub const BACKEND: &str = super::backends::OPENAI;
    /// Ollama exposes the OpenAI-compatible API on this address
    pub const OPENAI_BASE_URL: &str = "http://127.0.0.1:11434";
    /// Default model for OpenAI-compatible servers
    pub const OPENAI_MODEL: &str = "llama3.1";
    /// Gemini API host
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    /// Default Gemini model
    pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
    /// Sampling temperature used when none is configured
    pub const TEMPERATURE: f32 = 0.3;
}

/// Timeout configuration (in seconds)
pub mod timeouts {
    /// Deadline for a single completion call
    pub const COMPLETION_SECS: u64 = 60;
}

/// Environment variables holding API keys
pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
}
