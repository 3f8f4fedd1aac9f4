//! Delivery of the assembled block to its destination

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An injector refused or failed to place the block
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InjectionError(pub String);

/// Outcome of handing a block to an injector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionResult {
    pub injected: bool,
    pub html: String,
}

/// Port for placing a UI block into a page or document.
///
/// An `Err` aborts the run with `PipelineError::InjectionFailed`.
#[async_trait]
pub trait BlockInjector: Send + Sync {
    async fn inject(&self, block: &str) -> Result<InjectionResult, InjectionError>;
}

/// Injector that only reports the block back to the caller.
///
/// The caller (a web client, the CLI) does the actual placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoInjector;

#[async_trait]
impl BlockInjector for EchoInjector {
    async fn inject(&self, block: &str) -> Result<InjectionResult, InjectionError> {
        log::info!("Injecting block ({} bytes)", block.len());
        log::debug!("Injected block:\n{}", block);
        Ok(InjectionResult {
            injected: true,
            html: block.to_string(),
        })
    }
}
