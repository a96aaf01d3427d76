use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::items::Item;

/// Current snapshot schema. `1.1.0` added the icon registry.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.1.0";

/// Schema assumed for payloads that carry no version.
pub const LEGACY_SCHEMA_VERSION: &str = "1.0.0";

/// Name of the data file inside a remote document.
pub const SNAPSHOT_FILE_NAME: &str = "valueof_data.json";

/// Where a snapshot is headed. Decides which timestamp key gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    /// Pushed to the remote document (`syncedAt`).
    Sync,
    /// Written to a local backup file (`exportedAt`).
    Export,
}

/// Whole-collection backup. Applied only as a complete replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<String>>,
    pub version: String,
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// When the snapshot was written, whichever key carried it.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.synced_at.or(self.exported_at)
    }
}
