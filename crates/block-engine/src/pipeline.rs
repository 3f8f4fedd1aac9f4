//! The command-to-block pipeline
//!
//! Runs the stages strictly in order (extract, resolve, dependencies,
//! assemble, inject) and reports progress to the sink passed in by the
//! caller. A failing stage aborts the run: a `failed` event is emitted and
//! the error is returned, with no partial result.
//!
//! Progress delivery is best-effort. A sink that errors (for example because
//! the receiving client went away) never stops the run.

use std::sync::Arc;

use inference::LanguageModel;
use serde::Serialize;

use crate::assembler::generate_ui_block;
use crate::dependencies::resolve_dependencies;
use crate::error::Result;
use crate::events::{EventSink, PipelineEvent};
use crate::injector::{BlockInjector, EchoInjector, InjectionResult};
use crate::intent::IntentExtractor;
use crate::resolver::{Resolution, TemplateResolver};
use crate::store::SharedTemplateStore;
use crate::types::{Intent, Template};

/// Everything a successful run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub execution_id: String,
    pub intent: Intent,
    pub selected_template: Template,
    pub resolution: Resolution,
    pub dependencies: Vec<String>,
    pub generated_block: String,
    pub injection_result: InjectionResult,
}

/// Orchestrates one command through every stage.
///
/// Holds no per-run state, so one pipeline can serve concurrent runs.
#[derive(Clone)]
pub struct BlockPipeline {
    extractor: IntentExtractor,
    resolver: TemplateResolver,
    injector: Arc<dyn BlockInjector>,
}

impl BlockPipeline {
    /// Create a pipeline that echoes the block back as its injection result.
    pub fn new(model: Arc<dyn LanguageModel>, store: SharedTemplateStore) -> Self {
        Self {
            extractor: IntentExtractor::new(model.clone()),
            resolver: TemplateResolver::new(model, store),
            injector: Arc::new(EchoInjector),
        }
    }

    pub fn with_injector(mut self, injector: Arc<dyn BlockInjector>) -> Self {
        self.injector = injector;
        self
    }

    /// Turn a free-text command into an injected UI block.
    pub async fn run(&self, command: &str, sink: &dyn EventSink) -> Result<PipelineResult> {
        let execution_id = format!("ui-run-{}", uuid::Uuid::new_v4());
        log::info!("Starting run {} for command: {}", execution_id, command);

        emit(
            sink,
            PipelineEvent::Start {
                execution_id: execution_id.clone(),
                command: command.to_string(),
            },
        );

        match self.execute(&execution_id, command, sink).await {
            Ok(result) => {
                log::info!("Run {} complete ({:?})", execution_id, result.resolution);
                Ok(result)
            }
            Err(e) => {
                log::error!("Run {} failed: {}", execution_id, e);
                emit(
                    sink,
                    PipelineEvent::Failed {
                        execution_id,
                        stage: e.stage(),
                        error: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        execution_id: &str,
        command: &str,
        sink: &dyn EventSink,
    ) -> Result<PipelineResult> {
        let extraction = self.extractor.extract_intent(command).await?;
        if let Some(degraded) = extraction.degraded {
            emit(
                sink,
                PipelineEvent::IntentParseDegraded {
                    execution_id: execution_id.to_string(),
                    raw_response: degraded.raw_response,
                    reason: degraded.reason,
                },
            );
        }
        let intent = extraction.intent;
        emit(
            sink,
            PipelineEvent::IntentExtracted {
                execution_id: execution_id.to_string(),
                intent: intent.clone(),
            },
        );

        let resolved = self.resolver.resolve(&intent).await?;
        let template = resolved.template;
        emit(
            sink,
            PipelineEvent::TemplateSelected {
                execution_id: execution_id.to_string(),
                template_id: template.id.clone(),
                template_name: template.template_name.clone(),
                resolution: resolved.resolution,
            },
        );

        let dependencies = resolve_dependencies(&template);
        emit(
            sink,
            PipelineEvent::DependenciesResolved {
                execution_id: execution_id.to_string(),
                dependencies: dependencies.clone(),
            },
        );

        let generated_block = generate_ui_block(&template, &dependencies);
        emit(
            sink,
            PipelineEvent::Generated {
                execution_id: execution_id.to_string(),
                length: generated_block.len(),
            },
        );

        let injection_result = self.injector.inject(&generated_block).await?;
        emit(
            sink,
            PipelineEvent::InjectionComplete {
                execution_id: execution_id.to_string(),
                injected: injection_result.injected,
            },
        );

        Ok(PipelineResult {
            execution_id: execution_id.to_string(),
            intent,
            selected_template: template,
            resolution: resolved.resolution,
            dependencies,
            generated_block,
            injection_result,
        })
    }
}

fn emit(sink: &dyn EventSink, event: PipelineEvent) {
    let name = event.name();
    if let Err(e) = sink.send(event) {
        log::debug!("Dropped '{}' event: {}", name, e);
    }
}
