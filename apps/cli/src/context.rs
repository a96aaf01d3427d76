use std::sync::Arc;

use anyhow::Context;
use log::{debug, warn};
use valueof_core::items::Inventory;
use valueof_core::storage::{KeyValueStore, LocalStore};
use valueof_core::sync::{RemoteSnapshotStore, SyncConfig, SyncController};
use valueof_gist_sync::{GistClient, GistSnapshotStore};
use valueof_storage_sqlite::SqliteKeyValueStore;

use crate::config::AppConfig;

/// State shared by every command: the loaded inventory plus the stores it
/// came from.
pub struct AppContext {
    pub local: LocalStore,
    pub controller: SyncController,
    pub inventory: Inventory,
}

impl AppContext {
    /// Opens the SQLite store in the configured data directory and wires the
    /// gist transport.
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let store = SqliteKeyValueStore::open_in_dir(config.data_dir()).with_context(|| {
            format!(
                "Failed to open local data in {}",
                config.data_dir().display()
            )
        })?;
        let client = GistClient::new(&config.api_url).context("Failed to build HTTP client")?;
        Ok(Self::new(
            Arc::new(store),
            Arc::new(GistSnapshotStore::new(client)),
        ))
    }

    pub fn new(store: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteSnapshotStore>) -> Self {
        let local = LocalStore::new(store);
        let inventory = local.load_inventory();
        debug!(
            "Loaded {} items and {} icons",
            inventory.len(),
            inventory.icons().len()
        );
        Self {
            controller: SyncController::new(remote, local.clone()),
            local,
            inventory,
        }
    }

    pub fn sync_config(&self) -> Option<SyncConfig> {
        self.local.load_sync_config()
    }

    /// Persists the inventory; returns a notice for the user when that failed.
    pub fn save(&self) -> Option<String> {
        if self.local.save_inventory(&self.inventory) {
            None
        } else {
            warn!("Inventory could not be saved");
            Some("warning: changes could not be saved to local storage".to_string())
        }
    }
}
