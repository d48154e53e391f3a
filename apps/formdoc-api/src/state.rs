//! Application state for FormDoc API

use anyhow::Result;
use std::path::PathBuf;

use draft_store::SqliteDraftStore;
use formdoc_core::DocumentEngine;

pub struct AppState {
    pub store: SqliteDraftStore,
    pub engine: DocumentEngine,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        // Get database path from env or use default
        let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let data_dir = dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("formdoc-api");
            std::fs::create_dir_all(&data_dir).ok();
            format!("sqlite:{}/formdoc.db?mode=rwc", data_dir.display())
        });

        let store = SqliteDraftStore::connect(&db_url).await?;

        Ok(Self {
            store,
            engine: DocumentEngine::new(),
        })
    }
}

/// Get platform-specific data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}
