//! SQLite draft store: the durable saved-draft tier.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use shared_types::ValueSet;

use crate::{DraftStore, StoreError};

pub struct SqliteDraftStore {
    pool: SqlitePool,
}

impl SqliteDraftStore {
    /// Connect and run migrations. The URL is `sqlite:` form, e.g.
    /// `sqlite:/path/to/formdoc.db?mode=rwc` or `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to draft database: {}", database_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drafts (
                template_id TEXT PRIMARY KEY,
                values_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn save(&self, template_id: &str, values: &ValueSet) -> Result<(), StoreError> {
        let values_json = serde_json::to_string(values)
            .map_err(|e| StoreError::Corrupt(template_id.to_string(), e.to_string()))?;
        sqlx::query(
            r#"
            INSERT INTO drafts (template_id, values_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(template_id) DO UPDATE SET
                values_json = excluded.values_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(template_id)
        .bind(&values_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Saved draft for template: {}", template_id);
        Ok(())
    }

    async fn load(&self, template_id: &str) -> Result<Option<ValueSet>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT values_json FROM drafts WHERE template_id = ?")
                .bind(template_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            None => Ok(None),
            Some((values_json,)) => {
                let values = serde_json::from_str(&values_json)
                    .map_err(|e| StoreError::Corrupt(template_id.to_string(), e.to_string()))?;
                Ok(Some(values))
            }
        }
    }

    async fn clear(&self, template_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM drafts WHERE template_id = ?")
            .bind(template_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
