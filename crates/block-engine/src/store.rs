//! Template storage with optional file persistence.
//!
//! [`TemplateStore`] is the port the resolver talks to. The bundled
//! [`MemoryTemplateStore`] keeps templates in memory, in insertion order, and
//! can mirror every template to a JSON file for durability across restarts.
//! User-edited variants are stored alongside, under `variants/`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::types::{
    NewTemplate, Template, TemplateId, TemplatePatch, TemplateVariant, VariantSource,
};

/// Subdirectory of the persistence directory holding variants
const VARIANTS_DIR: &str = "variants";

/// Errors raised by template stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No template with this id
    #[error("Template not found: {0}")]
    NotFound(TemplateId),

    /// Conditional write lost against a newer version
    #[error("Version conflict on template '{id}': expected {expected}, found {actual}")]
    VersionConflict {
        id: TemplateId,
        expected: u64,
        actual: u64,
    },

    /// Backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent collection of templates keyed by component type.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// All templates for a component, in store order
    async fn find_by_component(&self, component: &str) -> Result<Vec<Template>, StoreError>;

    /// Persist a new template and return it with its assigned identity
    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError>;

    /// Overwrite html/fields/validation if the stored version still equals
    /// `expected_version`; returns the updated template
    async fn update_fields(
        &self,
        id: &str,
        expected_version: u64,
        patch: TemplatePatch,
    ) -> Result<Template, StoreError>;

    /// Every template, in store order
    async fn list(&self) -> Result<Vec<Template>, StoreError>;

    /// Remove every template and variant, returning how many templates
    /// were removed
    async fn clear(&self) -> Result<usize, StoreError>;

    /// Record a user-edited copy of a stored template's markup
    async fn save_variant(
        &self,
        parent_id: &str,
        user: &str,
        html: &str,
    ) -> Result<TemplateVariant, StoreError>;

    /// Variants saved against a template, oldest first
    async fn variants_of(&self, parent_id: &str) -> Result<Vec<TemplateVariant>, StoreError>;
}

/// Shared store type for application state
pub type SharedTemplateStore = Arc<dyn TemplateStore>;

/// In-memory template store with optional file persistence.
///
/// Disk writes run synchronously while the write lock is held, so memory
/// and disk change together. Lock order is templates, then variants.
///
/// # Example
///
/// ```ignore
/// use block_engine::MemoryTemplateStore;
///
/// let store = MemoryTemplateStore::with_persistence(".blockwright/templates");
/// let count = store.load_from_disk()?;
/// println!("Loaded {} templates", count);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    /// Stored templates, in insertion order.
    templates: RwLock<Vec<Template>>,
    /// Saved variants, in insertion order.
    variants: RwLock<Vec<TemplateVariant>>,
    /// Optional directory for file persistence.
    persist_path: Option<PathBuf>,
}

impl MemoryTemplateStore {
    /// Create a new in-memory store without persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that persists to the given directory.
    ///
    /// The directory will be created if it doesn't exist when saving.
    pub fn with_persistence(path: impl AsRef<Path>) -> Self {
        Self {
            persist_path: Some(path.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }

    /// Get a template by id.
    pub fn get(&self, id: &str) -> Option<Template> {
        self.templates.read().iter().find(|t| t.id == id).cloned()
    }

    /// Load all templates and variants from the persistence directory,
    /// replacing memory.
    ///
    /// Files are ordered by creation time, then id, so the store order is
    /// stable across restarts. Returns the number of templates loaded.
    pub fn load_from_disk(&self) -> Result<usize, StoreError> {
        let Some(ref path) = self.persist_path else {
            return Ok(0);
        };

        let mut templates: Vec<Template> = read_json_dir(path)?;
        templates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let mut variants: Vec<TemplateVariant> = read_json_dir(&path.join(VARIANTS_DIR))?;
        variants.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let count = templates.len();
        log::info!(
            "Loaded {} template(s) and {} variant(s) from {:?}",
            count,
            variants.len(),
            path
        );
        *self.templates.write() = templates;
        *self.variants.write() = variants;
        Ok(count)
    }

    /// Save a template to disk (if persistence is enabled).
    fn save_to_disk(&self, template: &Template) -> Result<(), StoreError> {
        match self.persist_path {
            Some(ref path) => write_json(path, &template.id, template),
            None => Ok(()),
        }
    }

    /// Delete a template from disk (if persistence is enabled).
    fn delete_from_disk(&self, id: &str) -> Result<(), StoreError> {
        match self.persist_path {
            Some(ref path) => remove_json(path, id),
            None => Ok(()),
        }
    }

    fn save_variant_to_disk(&self, variant: &TemplateVariant) -> Result<(), StoreError> {
        match self.persist_path {
            Some(ref path) => write_json(&path.join(VARIANTS_DIR), &variant.id, variant),
            None => Ok(()),
        }
    }

    fn delete_variant_from_disk(&self, id: &str) -> Result<(), StoreError> {
        match self.persist_path {
            Some(ref path) => remove_json(&path.join(VARIANTS_DIR), id),
            None => Ok(()),
        }
    }
}

/// Parse every `*.json` file in a directory, skipping ones that don't parse.
fn read_json_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, StoreError> {
    let mut loaded = Vec::new();
    if !dir.exists() {
        return Ok(loaded);
    }

    for entry in std::fs::read_dir(dir)? {
        let file_path = entry?.path();
        if !file_path.is_file() || file_path.extension().map_or(true, |e| e != "json") {
            continue;
        }

        let content = std::fs::read_to_string(&file_path)?;
        match serde_json::from_str::<T>(&content) {
            Ok(item) => {
                log::debug!("Loaded {:?}", file_path);
                loaded.push(item);
            }
            Err(e) => {
                log::warn!("Failed to parse {:?}: {}", file_path, e);
            }
        }
    }
    Ok(loaded)
}

fn write_json<T: Serialize>(dir: &Path, id: &str, value: &T) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir)?;
    let file_path = dir.join(format!("{}.json", id));
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(&file_path, content)?;
    log::debug!("Saved '{}' to {:?}", id, file_path);
    Ok(())
}

fn remove_json(dir: &Path, id: &str) -> Result<(), StoreError> {
    let file_path = dir.join(format!("{}.json", id));
    if file_path.exists() {
        std::fs::remove_file(&file_path)?;
        log::debug!("Deleted '{}' from {:?}", id, file_path);
    }
    Ok(())
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn find_by_component(&self, component: &str) -> Result<Vec<Template>, StoreError> {
        Ok(self
            .templates
            .read()
            .iter()
            .filter(|t| t.component == component)
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError> {
        let template = Template::from_new(uuid::Uuid::new_v4().to_string(), new, Utc::now());

        let mut guard = self.templates.write();
        self.save_to_disk(&template)?;
        guard.push(template.clone());
        Ok(template)
    }

    async fn update_fields(
        &self,
        id: &str,
        expected_version: u64,
        patch: TemplatePatch,
    ) -> Result<Template, StoreError> {
        let mut guard = self.templates.write();
        let slot = guard
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if slot.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected: expected_version,
                actual: slot.version,
            });
        }

        let mut updated = slot.clone();
        updated.apply_patch(patch, Utc::now());
        self.save_to_disk(&updated)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        Ok(self.templates.read().clone())
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        let mut templates = self.templates.write();
        let mut variants = self.variants.write();

        // Entries leave memory only once their file is gone, so a failed
        // delete leaves memory matching what is still on disk.
        while let Some(variant) = variants.last() {
            self.delete_variant_from_disk(&variant.id)?;
            variants.pop();
        }

        let mut removed = 0;
        while let Some(template) = templates.last() {
            self.delete_from_disk(&template.id)?;
            templates.pop();
            removed += 1;
        }
        Ok(removed)
    }

    async fn save_variant(
        &self,
        parent_id: &str,
        user: &str,
        html: &str,
    ) -> Result<TemplateVariant, StoreError> {
        let templates = self.templates.read();
        if !templates.iter().any(|t| t.id == parent_id) {
            return Err(StoreError::NotFound(parent_id.to_string()));
        }

        let variant = TemplateVariant {
            id: uuid::Uuid::new_v4().to_string(),
            parent_template_id: parent_id.to_string(),
            user: user.to_string(),
            html: html.to_string(),
            source: VariantSource::UserModified,
            created_at: Utc::now(),
        };

        let mut variants = self.variants.write();
        self.save_variant_to_disk(&variant)?;
        variants.push(variant.clone());
        Ok(variant)
    }

    async fn variants_of(&self, parent_id: &str) -> Result<Vec<TemplateVariant>, StoreError> {
        Ok(self
            .variants
            .read()
            .iter()
            .filter(|v| v.parent_template_id == parent_id)
            .cloned()
            .collect())
    }
}
