//! Error types for the block pipeline

use std::fmt;
use std::time::Duration;

use inference::InferenceError;
use thiserror::Error;

use crate::injector::InjectionError;
use crate::store::StoreError;
use crate::types::TemplateId;

/// Result type alias using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The pipeline stage an error or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineStage {
    IntentExtraction,
    TemplateSelection,
    TemplateGeneration,
    TemplateUpdate,
    Injection,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IntentExtraction => "intent extraction",
            Self::TemplateSelection => "template selection",
            Self::TemplateGeneration => "template generation",
            Self::TemplateUpdate => "template update",
            Self::Injection => "injection",
        };
        f.write_str(name)
    }
}

/// Fatal errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The language model call itself failed
    #[error("{stage} failed: language model call failed: {source}")]
    ModelCallFailed {
        stage: PipelineStage,
        #[source]
        source: InferenceError,
    },

    /// The language model did not answer before the deadline
    #[error("{stage} failed: language model call timed out after {timeout:?}")]
    ModelTimeout {
        stage: PipelineStage,
        timeout: Duration,
    },

    /// The template store could not be read or written
    #[error("{stage} failed: template store unavailable: {source}")]
    StoreUnavailable {
        stage: PipelineStage,
        #[source]
        source: StoreError,
    },

    /// Selection was asked to choose among no candidates
    #[error("template selection failed: no candidate templates for component '{component}'")]
    NoViableTemplate { component: String },

    /// A concurrent update changed the template first
    #[error("template update failed: template '{template_id}' was modified concurrently")]
    StoreConflict { template_id: TemplateId },

    /// The injector rejected the block
    #[error("injection failed: {0}")]
    InjectionFailed(#[from] InjectionError),
}

impl PipelineError {
    /// Classify a language model failure, splitting out deadline expiry
    pub fn model(stage: PipelineStage, err: InferenceError) -> Self {
        match err {
            InferenceError::Timeout(timeout) => Self::ModelTimeout { stage, timeout },
            other => Self::ModelCallFailed {
                stage,
                source: other,
            },
        }
    }

    /// Classify a store failure, splitting out version conflicts
    pub fn store(stage: PipelineStage, err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { id, .. } => Self::StoreConflict { template_id: id },
            other => Self::StoreUnavailable {
                stage,
                source: other,
            },
        }
    }

    /// The stage that failed
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::ModelCallFailed { stage, .. }
            | Self::ModelTimeout { stage, .. }
            | Self::StoreUnavailable { stage, .. } => *stage,
            Self::NoViableTemplate { .. } => PipelineStage::TemplateSelection,
            Self::StoreConflict { .. } => PipelineStage::TemplateUpdate,
            Self::InjectionFailed(_) => PipelineStage::Injection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference::BackendError;

    #[test]
    fn test_timeout_is_split_out() {
        let err = PipelineError::model(
            PipelineStage::IntentExtraction,
            InferenceError::Timeout(Duration::from_secs(3)),
        );
        assert!(matches!(err, PipelineError::ModelTimeout { .. }));
        assert_eq!(err.stage(), PipelineStage::IntentExtraction);
    }

    #[test]
    fn test_message_names_stage() {
        let err = PipelineError::model(
            PipelineStage::TemplateGeneration,
            InferenceError::Backend(BackendError::Inference("quota".to_string())),
        );
        let message = err.to_string();
        assert!(message.starts_with("template generation failed"));
        assert!(message.contains("quota"));
    }

    #[test]
    fn test_version_conflict_becomes_store_conflict() {
        let err = PipelineError::store(
            PipelineStage::TemplateUpdate,
            StoreError::VersionConflict {
                id: "t-1".to_string(),
                expected: 1,
                actual: 2,
            },
        );
        assert!(matches!(err, PipelineError::StoreConflict { ref template_id } if template_id == "t-1"));
        assert_eq!(err.stage(), PipelineStage::TemplateUpdate);
    }
}
