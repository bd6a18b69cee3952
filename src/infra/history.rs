//! Infrastructure implementation of the `HistoryStore` port.
//!
//! `HistoryManager` provides async load/append using
//! `tokio::task::spawn_blocking` with atomic write (temp file + rename) to
//! prevent ledger corruption.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::HistoryStore;
use crate::domain::history::CollectionRecord;

/// Ledger file manager — implements `HistoryStore` for the infra layer.
pub struct HistoryManager {
    path: PathBuf,
}

impl HistoryManager {
    /// Create a history manager using the default path (`~/.haul/history.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".haul").join("history.json")))
    }

    /// Create a history manager with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Synchronous load — used internally by `load` via `spawn_blocking`.
    fn load_sync(&self) -> Result<Vec<CollectionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading history file {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing history file {}", self.path.display()))
    }

    /// Synchronous save — used internally by `append` via `spawn_blocking`.
    fn save_sync(&self, records: &[CollectionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(records).context("serializing history")?;

        // Atomic write via temp file then rename.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing history file {}", self.path.display()))?;

        Ok(())
    }
}

impl HistoryStore for HistoryManager {
    async fn append(&self, record: CollectionRecord) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mgr = HistoryManager::with_path(path);
            let mut records = mgr.load_sync()?;
            records.push(record);
            mgr.save_sync(&records)
        })
        .await
        .context("history append task panicked")?
    }

    async fn load(&self) -> Result<Vec<CollectionRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mgr = HistoryManager::with_path(path);
            mgr.load_sync()
        })
        .await
        .context("history load task panicked")?
    }
}
