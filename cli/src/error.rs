//! Errors surfaced by the command line

use block_engine::{PipelineError, StoreError};
use inference::InferenceError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not set up the language model: {0}")]
    Inference(#[from] InferenceError),

    #[error("Template store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Refusing to save an empty block")]
    EmptyBlock,
}
