//! Intent extraction from free-text commands
//!
//! One model call per command. A response that does not parse into an intent
//! is not an error: extraction degrades to the empty intent and reports why,
//! so the caller can surface it.

use std::sync::Arc;

use inference::LanguageModel;
use serde_json::Value;

use crate::error::{PipelineError, PipelineStage, Result};
use crate::markup::strip_code_fences;
use crate::prompts;
use crate::types::Intent;

/// Why a model response was not turned into an intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentDegradation {
    /// The response after fence stripping
    pub raw_response: String,
    pub reason: String,
}

/// Result of one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentExtraction {
    pub intent: Intent,
    /// Set when the response could not be parsed; `intent` is then empty
    pub degraded: Option<IntentDegradation>,
}

impl IntentExtraction {
    fn parsed(intent: Intent) -> Self {
        Self {
            intent,
            degraded: None,
        }
    }

    fn degraded(raw_response: String, reason: impl Into<String>) -> Self {
        Self {
            intent: Intent::empty(),
            degraded: Some(IntentDegradation {
                raw_response,
                reason: reason.into(),
            }),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Turns commands into intents using a language model
#[derive(Clone)]
pub struct IntentExtractor {
    model: Arc<dyn LanguageModel>,
}

impl IntentExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Extract the intent behind `command`.
    ///
    /// Fails only if the model call itself fails or times out.
    pub async fn extract_intent(&self, command: &str) -> Result<IntentExtraction> {
        let response = self
            .model
            .complete(&prompts::intent_prompt(command))
            .await
            .map_err(|e| PipelineError::model(PipelineStage::IntentExtraction, e))?;

        let extraction = parse_intent(&response);
        if let Some(ref degraded) = extraction.degraded {
            log::warn!(
                "Failed to parse intent ({}); continuing with empty intent. Response: {}",
                degraded.reason,
                degraded.raw_response
            );
        } else {
            log::debug!("Extracted intent: {:?}", extraction.intent);
        }
        Ok(extraction)
    }
}

/// Parse a raw model response into an intent.
pub fn parse_intent(response: &str) -> IntentExtraction {
    let content = strip_code_fences(response);

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => return IntentExtraction::degraded(content, format!("invalid JSON: {}", e)),
    };

    let Value::Object(object) = value else {
        return IntentExtraction::degraded(content, "expected a JSON object");
    };

    let component = match object.get("component") {
        Some(Value::String(c)) if !c.is_empty() => c.clone(),
        _ => return IntentExtraction::degraded(content, "missing component"),
    };

    IntentExtraction::parsed(Intent {
        component: Some(component),
        fields: object.get("fields").and_then(string_list),
        validation: object.get("validation").and_then(string_list),
    })
}

/// Array elements as strings; non-string elements become compact JSON text.
fn string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{strings, ScriptedModel};

    #[test]
    fn test_parse_plain_json() {
        let extraction = parse_intent(
            r#"{"component":"contact_form","fields":["name","email"],"validation":["required"]}"#,
        );
        assert!(!extraction.is_degraded());
        assert_eq!(
            extraction.intent,
            Intent::new("contact_form", ["name", "email"], ["required"])
        );
    }

    #[test]
    fn test_parse_fenced_json() {
        let extraction = parse_intent("```json\n{\"component\": \"modal\", \"fields\": []}\n```");
        assert_eq!(extraction.intent.component(), Some("modal"));
        assert_eq!(extraction.intent.fields, Some(vec![]));
        assert_eq!(extraction.intent.validation, None);
    }

    #[test]
    fn test_non_string_elements_are_normalized() {
        let extraction = parse_intent(
            r#"{"component":"login_form","fields":["email"],"validation":[{"field":"email","rule":"required"}, 3]}"#,
        );
        assert_eq!(
            extraction.intent.validation(),
            strings(&[r#"{"field":"email","rule":"required"}"#, "3"]).as_slice()
        );
    }

    #[test]
    fn test_malformed_json_degrades() {
        let extraction = parse_intent("Sure! Here is your form.");
        assert!(extraction.intent.is_empty());
        let degraded = extraction.degraded.unwrap();
        assert_eq!(degraded.raw_response, "Sure! Here is your form.");
        assert!(degraded.reason.starts_with("invalid JSON"));
    }

    #[test]
    fn test_non_object_degrades() {
        let extraction = parse_intent("[1, 2]");
        assert!(extraction.intent.is_empty());
        assert_eq!(extraction.degraded.unwrap().reason, "expected a JSON object");
    }

    #[test]
    fn test_missing_component_degrades() {
        for response in ["{}", r#"{"component": ""}"#, r#"{"fields": ["email"]}"#] {
            let extraction = parse_intent(response);
            assert!(extraction.intent.is_empty(), "{}", response);
            assert_eq!(extraction.degraded.unwrap().reason, "missing component");
        }
    }

    #[tokio::test]
    async fn test_extract_makes_one_call() {
        let model = Arc::new(ScriptedModel::new([r#"{"component":"modal"}"#]));
        let extractor = IntentExtractor::new(model.clone());

        let extraction = extractor.extract_intent("open a modal").await.unwrap();
        assert_eq!(extraction.intent.component(), Some("modal"));
        assert_eq!(model.calls(), 1);
        assert!(model.prompts()[0].contains("open a modal"));
    }

    #[tokio::test]
    async fn test_model_timeout_is_fatal() {
        let model = Arc::new(ScriptedModel::new(Vec::<String>::new()).then_timeout());
        let extractor = IntentExtractor::new(model);

        let err = extractor.extract_intent("anything").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ModelTimeout {
                stage: PipelineStage::IntentExtraction,
                ..
            }
        ));
    }
}
