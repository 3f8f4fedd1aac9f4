//! Template resolution: reuse, update or generate
//!
//! Given an intent, the resolver always produces exactly one template:
//!
//! - no stored template for the component: generate one and persist it
//! - a stored template with the same field/validation signature: reuse it
//!   without calling the model
//! - otherwise: let the model pick a candidate by name, then rewrite its
//!   markup for the new signature and persist it on the same id
//!
//! Model and store failures are fatal. Nothing is fabricated when the model
//! is unreachable.

use std::sync::Arc;

use inference::LanguageModel;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineStage, Result};
use crate::markup::{split_style_block, strip_code_fences};
use crate::prompts;
use crate::store::TemplateStore;
use crate::types::{Intent, NewTemplate, Template, TemplatePatch};

/// Component name used when the intent has none
const UNKNOWN_COMPONENT: &str = "unknown";

/// How the returned template was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// A stored template already satisfied the intent
    ExactMatch,
    /// A stored template was rewritten for the intent
    Updated,
    /// A new template was generated and stored
    Generated,
}

/// Where the candidate set leaves the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolverState<'a> {
    NoTemplatesExist,
    /// First matching template in store order
    TemplatesExistExactMatch(&'a Template),
    TemplatesExistNoMatch,
}

impl<'a> ResolverState<'a> {
    /// Classify the candidates stored for an intent's component.
    pub fn classify(candidates: &'a [Template], intent: &Intent) -> Self {
        if candidates.is_empty() {
            return Self::NoTemplatesExist;
        }
        match candidates.iter().find(|t| t.satisfies(intent)) {
            Some(template) => Self::TemplatesExistExactMatch(template),
            None => Self::TemplatesExistNoMatch,
        }
    }
}

/// A template together with how it was resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTemplate {
    pub template: Template,
    pub resolution: Resolution,
}

/// Selects, updates or generates the template for an intent
#[derive(Clone)]
pub struct TemplateResolver {
    model: Arc<dyn LanguageModel>,
    store: Arc<dyn TemplateStore>,
}

impl TemplateResolver {
    pub fn new(model: Arc<dyn LanguageModel>, store: Arc<dyn TemplateStore>) -> Self {
        Self { model, store }
    }

    pub async fn resolve(&self, intent: &Intent) -> Result<ResolvedTemplate> {
        // An intent without a component has no candidates to look up.
        let candidates = match intent.component() {
            Some(component) => self
                .store
                .find_by_component(component)
                .await
                .map_err(|e| PipelineError::store(PipelineStage::TemplateSelection, e))?,
            None => Vec::new(),
        };

        match ResolverState::classify(&candidates, intent) {
            ResolverState::NoTemplatesExist => {
                log::debug!("No templates for {:?}; generating", intent.component());
                let template = self.generate(intent).await?;
                Ok(ResolvedTemplate {
                    template,
                    resolution: Resolution::Generated,
                })
            }
            ResolverState::TemplatesExistExactMatch(template) => {
                log::debug!("Exact match: template '{}'", template.id);
                Ok(ResolvedTemplate {
                    template: template.clone(),
                    resolution: Resolution::ExactMatch,
                })
            }
            ResolverState::TemplatesExistNoMatch => {
                let chosen = self.select(&candidates, intent).await?;
                if chosen.satisfies(intent) {
                    return Ok(ResolvedTemplate {
                        template: chosen.clone(),
                        resolution: Resolution::ExactMatch,
                    });
                }
                let template = self.update(chosen, intent).await?;
                Ok(ResolvedTemplate {
                    template,
                    resolution: Resolution::Updated,
                })
            }
        }
    }

    /// Ask the model to pick a candidate by name; unknown answers fall back
    /// to the first candidate.
    async fn select<'a>(&self, candidates: &'a [Template], intent: &Intent) -> Result<&'a Template> {
        let first = candidates
            .first()
            .ok_or_else(|| PipelineError::NoViableTemplate {
                component: intent.component().unwrap_or_default().to_string(),
            })?;
        let prompt = prompts::selection_prompt(
            candidates.iter().map(|t| t.template_name.as_str()),
            intent,
        );
        let answer = self
            .model
            .complete(&prompt)
            .await
            .map_err(|e| PipelineError::model(PipelineStage::TemplateSelection, e))?;
        let answer = answer.trim();

        let chosen = candidates
            .iter()
            .find(|t| t.template_name == answer)
            .unwrap_or(first);
        if chosen.template_name != answer {
            log::debug!(
                "Model answered '{}', not a candidate name; using '{}'",
                answer,
                chosen.template_name
            );
        }
        Ok(chosen)
    }

    async fn update(&self, chosen: &Template, intent: &Intent) -> Result<Template> {
        let response = self
            .model
            .complete(&prompts::update_prompt(intent, &chosen.html))
            .await
            .map_err(|e| PipelineError::model(PipelineStage::TemplateUpdate, e))?;

        let patch = TemplatePatch {
            html: strip_code_fences(&response),
            fields: intent.fields().to_vec(),
            validation: intent.validation().to_vec(),
        };
        let updated = self
            .store
            .update_fields(&chosen.id, chosen.version, patch)
            .await
            .map_err(|e| PipelineError::store(PipelineStage::TemplateUpdate, e))?;

        log::info!(
            "Updated template '{}' ({}) to version {}",
            updated.template_name,
            updated.id,
            updated.version
        );
        Ok(updated)
    }

    async fn generate(&self, intent: &Intent) -> Result<Template> {
        let component = intent.component().unwrap_or_default();
        let response = self
            .model
            .complete(&prompts::generation_prompt(component, intent))
            .await
            .map_err(|e| PipelineError::model(PipelineStage::TemplateGeneration, e))?;

        let split = split_style_block(&strip_code_fences(&response));
        let label = if component.is_empty() {
            UNKNOWN_COMPONENT
        } else {
            component
        };
        let new = NewTemplate::new(component, format!("{} (auto-generated)", label), split.html)
            .with_css(split.css)
            .with_signature(intent.fields().to_vec(), intent.validation().to_vec());

        let template = self
            .store
            .create(new)
            .await
            .map_err(|e| PipelineError::store(PipelineStage::TemplateGeneration, e))?;

        log::info!("Created template '{}' ({})", template.template_name, template.id);
        Ok(template)
    }
}
