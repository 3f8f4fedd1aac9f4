//! Core data types for intents and templates
//!
//! An [`Intent`] is extracted fresh for every request. A [`Template`] is the
//! persisted markup/style/script bundle that the resolver reuses, updates or
//! generates for an intent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a stored template.
pub type TemplateId = String;

/// Structured request extracted from a free-text command.
///
/// All fields are optional: a response the extractor could not parse yields
/// the empty intent, which is carried through the pipeline as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Component type, e.g. `contact_form`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Ordered field names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Ordered validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<String>>,
}

impl Intent {
    /// Create a fully populated intent.
    pub fn new<F, V>(component: impl Into<String>, fields: F, validation: V) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            component: Some(component.into()),
            fields: Some(fields.into_iter().map(Into::into).collect()),
            validation: Some(validation.into_iter().map(Into::into).collect()),
        }
    }

    /// The empty intent produced when extraction degrades.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.component.is_none() && self.fields.is_none() && self.validation.is_none()
    }

    /// The component type, if present and non-empty.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref().filter(|c| !c.is_empty())
    }

    /// Requested fields; absent means empty.
    pub fn fields(&self) -> &[String] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Requested validation rules; absent means empty.
    pub fn validation(&self) -> &[String] {
        self.validation.as_deref().unwrap_or_default()
    }
}

/// A persisted, reusable UI template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    /// Component type this template renders
    pub component: String,
    /// Human label; not unique
    pub template_name: String,
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    /// Field signature this template satisfies
    #[serde(default)]
    pub fields: Vec<String>,
    /// Validation signature this template satisfies
    #[serde(default)]
    pub validation: Vec<String>,
    /// External script/style resources, first occurrence order
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Bumped on every update; used for conditional writes
    #[serde(default = "initial_version")]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn initial_version() -> u64 {
    1
}

impl Template {
    /// Materialize a new template from its creation request.
    pub fn from_new(id: impl Into<TemplateId>, new: NewTemplate, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            component: new.component,
            template_name: new.template_name,
            html: new.html,
            css: new.css,
            js: new.js,
            fields: new.fields,
            validation: new.validation,
            dependencies: dedup_preserving_order(new.dependencies),
            version: initial_version(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this template's signature matches the intent exactly.
    pub fn satisfies(&self, intent: &Intent) -> bool {
        is_intent_match(self, intent)
    }

    /// Apply an update in place and bump the version.
    pub fn apply_patch(&mut self, patch: TemplatePatch, now: DateTime<Utc>) {
        self.html = patch.html;
        self.fields = patch.fields;
        self.validation = patch.validation;
        self.version += 1;
        self.updated_at = now;
    }
}

/// Exact-match test between a template and an intent.
///
/// Both the field and the validation sequences must be equal element by
/// element, in order. Absent intent sequences compare as empty.
pub fn is_intent_match(template: &Template, intent: &Intent) -> bool {
    template.fields.as_slice() == intent.fields()
        && template.validation.as_slice() == intent.validation()
}

/// Everything needed to create a template; the store assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub component: String,
    pub template_name: String,
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub validation: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl NewTemplate {
    /// Start a creation request with markup only.
    pub fn new(
        component: impl Into<String>,
        template_name: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            template_name: template_name.into(),
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = css.into();
        self
    }

    pub fn with_js(mut self, js: impl Into<String>) -> Self {
        self.js = js.into();
        self
    }

    /// Set the field and validation signature.
    pub fn with_signature(mut self, fields: Vec<String>, validation: Vec<String>) -> Self {
        self.fields = fields;
        self.validation = validation;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// The mutable subset of a template touched by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePatch {
    pub html: String,
    pub fields: Vec<String>,
    pub validation: Vec<String>,
}

/// Unique identifier for a saved variant.
pub type VariantId = String;

/// Where a variant's markup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSource {
    /// Edited by a user after generation
    UserModified,
}

/// A user's edited copy of a template's markup.
///
/// Variants are kept apart from templates and never take part in
/// resolution; the parent template is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariant {
    pub id: VariantId,
    pub parent_template_id: TemplateId,
    pub user: String,
    pub html: String,
    pub source: VariantSource,
    pub created_at: DateTime<Utc>,
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
