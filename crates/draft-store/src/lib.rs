//! Document session store
//!
//! Key/value persistence of one working draft per template id, carrying a
//! value set between the edit step and the preview step. Two retention
//! tiers share one contract: [`MemoryDraftStore`] is the transient
//! hand-off-to-the-next-screen tier, [`SqliteDraftStore`] the durable
//! saved-draft tier. Only value sets are stored; computed totals are always
//! rederived on load, so they can never drift from their inputs.

mod memory;
mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use shared_types::ValueSet;

pub use memory::MemoryDraftStore;
pub use sqlite::SqliteDraftStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt draft for template '{0}': {1}")]
    Corrupt(String, String),
}

/// One draft per template id; each save overwrites. A store failure is
/// recoverable: callers keep their in-memory value set and the editing
/// session continues.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, template_id: &str, values: &ValueSet) -> Result<(), StoreError>;

    async fn load(&self, template_id: &str) -> Result<Option<ValueSet>, StoreError>;

    async fn clear(&self, template_id: &str) -> Result<(), StoreError>;
}
