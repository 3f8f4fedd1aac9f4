//! Block Engine - command to UI block pipeline for Blockwright
//!
//! This crate turns a free-text request ("create a contact form with name
//! and email") into a ready-to-inject HTML block. It supports:
//!
//! - Intent extraction through a language model, degrading explicitly on
//!   unparseable responses
//! - Template reuse by exact field/validation signature, with no model call
//! - Model-driven selection and in-place update of near-miss templates
//! - Generation of new templates when none exist for a component
//! - Deterministic assembly of dependencies, style, markup and script
//!
//! # Architecture
//!
//! - `BlockPipeline`: sequential orchestrator emitting progress events
//! - `TemplateResolver`: the reuse/update/generate state machine
//! - `TemplateStore`: storage port; `MemoryTemplateStore` persists templates
//!   and user-edited variants to JSON files
//! - `EventSink`: per-run progress delivery (not tied to any transport)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use block_engine::{BlockPipeline, MemoryTemplateStore, NullEventSink};
//!
//! let pipeline = BlockPipeline::new(Arc::new(gateway), Arc::new(MemoryTemplateStore::new()));
//! let result = pipeline.run("create a login form", &NullEventSink).await?;
//! println!("{}", result.generated_block);
//! ```

pub mod assembler;
pub mod dependencies;
pub mod error;
pub mod events;
pub mod injector;
pub mod intent;
pub mod markup;
pub mod pipeline;
mod prompts;
pub mod resolver;
pub mod seed;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export key types
pub use assembler::{generate_ui_block, ResolvedBlock};
pub use dependencies::resolve_dependencies;
pub use error::{PipelineError, PipelineStage, Result};
pub use events::{ChannelEventSink, EventError, EventSink, NullEventSink, PipelineEvent, VecEventSink};
pub use injector::{BlockInjector, EchoInjector, InjectionError, InjectionResult};
pub use intent::{IntentDegradation, IntentExtraction, IntentExtractor};
pub use pipeline::{BlockPipeline, PipelineResult};
pub use resolver::{Resolution, ResolvedTemplate, ResolverState, TemplateResolver};
pub use seed::{seed_store, seed_templates};
pub use store::{MemoryTemplateStore, SharedTemplateStore, StoreError, TemplateStore};
pub use types::{
    is_intent_match, Intent, NewTemplate, Template, TemplateId, TemplatePatch, TemplateVariant,
    VariantId, VariantSource,
};
