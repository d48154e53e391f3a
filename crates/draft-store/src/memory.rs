//! In-memory draft store: the transient hand-off tier.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_types::ValueSet;

use crate::{DraftStore, StoreError};

#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<String, ValueSet>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, template_id: &str, values: &ValueSet) -> Result<(), StoreError> {
        self.drafts
            .write()
            .await
            .insert(template_id.to_string(), values.clone());
        Ok(())
    }

    async fn load(&self, template_id: &str) -> Result<Option<ValueSet>, StoreError> {
        Ok(self.drafts.read().await.get(template_id).cloned())
    }

    async fn clear(&self, template_id: &str) -> Result<(), StoreError> {
        self.drafts.write().await.remove(template_id);
        Ok(())
    }
}
