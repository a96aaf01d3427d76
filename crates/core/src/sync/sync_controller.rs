use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{RemoteSnapshotStore, SyncConfig, SyncState};
use crate::errors::{Result, SyncError};
use crate::items::Inventory;
use crate::snapshot::{self, Snapshot, SnapshotOrigin, SNAPSHOT_FILE_NAME, SNAPSHOT_SCHEMA_VERSION};
use crate::storage::LocalStore;
use crate::utils::time_utils::iso_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushOutcome {
    pub document_id: String,
    /// True when this push created the remote document.
    pub created: bool,
    pub item_count: usize,
}

/// Result of applying a snapshot from the remote store or a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    pub item_count: usize,
    pub icons_replaced: bool,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub item_count: usize,
}

/// Default file name for an export made at `now`.
pub fn default_export_file_name(now: DateTime<Utc>) -> String {
    format!("valueof_backup_{}.json", iso_date(now))
}

/// Orchestrates push/pull against a remote store and export/import against
/// local files.
///
/// Callers must not run two transfers for the same configuration at once:
/// concurrent pushes race and whichever lands last is kept.
#[derive(Clone)]
pub struct SyncController {
    remote: Arc<dyn RemoteSnapshotStore>,
    local: LocalStore,
}

impl SyncController {
    pub fn new(remote: Arc<dyn RemoteSnapshotStore>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    /// Stores credentials. A blank token removes the configuration.
    pub fn configure(&self, token: &str, document_id: Option<&str>) -> Option<SyncConfig> {
        let config = SyncConfig::new(token, document_id.map(str::to_string));
        if !config.has_token() {
            self.local.clear_sync_config();
            debug!("Sync configuration cleared");
            return None;
        }
        self.local.save_sync_config(&config);
        debug!("Sync configured, state: {:?}", SyncState::of(Some(&config)));
        Some(config)
    }

    /// Uploads the full inventory, creating the remote document on first use.
    ///
    /// `config` is updated and persisted only after the remote accepted the
    /// payload.
    pub async fn push(
        &self,
        config: &mut SyncConfig,
        inventory: &Inventory,
        now: DateTime<Utc>,
    ) -> Result<PushOutcome> {
        if !config.has_token() {
            return Err(SyncError::MissingToken.into());
        }

        let started = Instant::now();
        let payload = snapshot::encode(
            inventory.items(),
            inventory.icons().as_slice(),
            SNAPSHOT_SCHEMA_VERSION,
            SnapshotOrigin::Sync,
            now,
        );
        let content = snapshot::to_json(&payload)?;

        let (document_id, created) = match config.linked_document() {
            Some(document_id) => {
                debug!("Updating remote document {}", document_id);
                self.remote
                    .update_document(&config.token, document_id, SNAPSHOT_FILE_NAME, content)
                    .await?;
                (document_id.to_string(), false)
            }
            None => {
                debug!("Creating remote document");
                let document_id = self
                    .remote
                    .create_document(&config.token, SNAPSHOT_FILE_NAME, content)
                    .await?;
                (document_id, true)
            }
        };

        config.document_id = Some(document_id.clone());
        self.local.save_sync_config(config);

        info!(
            "Pushed {} items to {} ({}) in {:?}",
            payload.item_count(),
            document_id,
            if created { "created" } else { "updated" },
            started.elapsed()
        );

        Ok(PushOutcome {
            document_id,
            created,
            item_count: payload.item_count(),
        })
    }

    /// Replaces the local inventory with the linked remote snapshot.
    ///
    /// Nothing local changes unless the document was fetched and decoded in full.
    pub async fn pull(&self, config: &SyncConfig, inventory: &mut Inventory) -> Result<RestoreOutcome> {
        if !config.has_token() {
            return Err(SyncError::MissingToken.into());
        }
        let document_id = config.linked_document().ok_or(SyncError::NotLinked)?;

        let started = Instant::now();
        let content = self
            .remote
            .fetch_document_file(&config.token, document_id, SNAPSHOT_FILE_NAME)
            .await?
            .ok_or(SyncError::MissingDataFile)?;

        let payload = snapshot::decode(content.as_bytes())?;
        let outcome = self.apply(payload, inventory);
        self.local.save_sync_config(config);

        info!(
            "Pulled {} items from {} in {:?}",
            outcome.item_count,
            document_id,
            started.elapsed()
        );
        Ok(outcome)
    }

    /// Writes the full inventory as a snapshot file at `path`.
    pub async fn export(
        &self,
        inventory: &Inventory,
        path: &Path,
        now: DateTime<Utc>,
    ) -> Result<ExportOutcome> {
        let payload = snapshot::encode(
            inventory.items(),
            inventory.icons().as_slice(),
            SNAPSHOT_SCHEMA_VERSION,
            SnapshotOrigin::Export,
            now,
        );
        let content = snapshot::to_json(&payload)?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| SyncError::file_access(path, e))?;

        info!("Exported {} items to {}", payload.item_count(), path.display());
        Ok(ExportOutcome {
            path: path.to_path_buf(),
            item_count: payload.item_count(),
        })
    }

    /// Replaces the local inventory with the snapshot stored at `path`.
    pub async fn import(&self, path: &Path, inventory: &mut Inventory) -> Result<RestoreOutcome> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SyncError::file_access(path, e))?;

        let payload = snapshot::decode(&bytes)?;
        let outcome = self.apply(payload, inventory);

        info!("Imported {} items from {}", outcome.item_count, path.display());
        Ok(outcome)
    }

    fn apply(&self, payload: Snapshot, inventory: &mut Inventory) -> RestoreOutcome {
        let outcome = RestoreOutcome {
            item_count: payload.item_count(),
            icons_replaced: payload.icons.is_some(),
            version: payload.version,
        };
        inventory.replace_all(payload.items, payload.icons);
        self.local.save_inventory(inventory);
        outcome
    }
}
