//! Test doubles for the pipeline ports

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use inference::{BackendError, InferenceError, LanguageModel};
use parking_lot::Mutex;

use crate::store::{MemoryTemplateStore, StoreError, TemplateStore};
use crate::types::{NewTemplate, Template, TemplatePatch, TemplateVariant};

/// Language model that replays scripted replies and records every prompt.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure after the scripted replies
    pub fn then_fail(self, error: InferenceError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Queue a deadline expiry after the scripted replies
    pub fn then_timeout(self) -> Self {
        self.then_fail(InferenceError::Timeout(Duration::from_secs(5)))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        self.prompts.lock().push(prompt.to_string());
        self.replies.lock().pop_front().unwrap_or_else(|| {
            Err(InferenceError::Backend(BackendError::Inference(
                "no scripted reply left".to_string(),
            )))
        })
    }
}

/// Store wrapper that counts calls and can be switched to fail.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryTemplateStore,
    finds: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
    unavailable: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryTemplateStore {
        &self.inner
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn go_offline(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for CountingStore {
    async fn find_by_component(&self, component: &str) -> Result<Vec<Template>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_by_component(component).await
    }

    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.create(new).await
    }

    async fn update_fields(
        &self,
        id: &str,
        expected_version: u64,
        patch: TemplatePatch,
    ) -> Result<Template, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update_fields(id, expected_version, patch).await
    }

    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        self.check()?;
        self.inner.list().await
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        self.check()?;
        self.inner.clear().await
    }

    async fn save_variant(
        &self,
        parent_id: &str,
        user: &str,
        html: &str,
    ) -> Result<TemplateVariant, StoreError> {
        self.check()?;
        self.inner.save_variant(parent_id, user, html).await
    }

    async fn variants_of(&self, parent_id: &str) -> Result<Vec<TemplateVariant>, StoreError> {
        self.check()?;
        self.inner.variants_of(parent_id).await
    }
}

/// Shorthand for owned string vectors in assertions and fixtures
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
