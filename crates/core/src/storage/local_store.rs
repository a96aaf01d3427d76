use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::icons::IconRegistry;
use crate::items::{Inventory, Item};
use crate::sync::SyncConfig;

pub const ITEMS_KEY: &str = "valueof_items";
pub const ICONS_KEY: &str = "valueof_icons";
pub const SYNC_CONFIG_KEY: &str = "valueof_sync_config";

/// Typed access to the local state over a [`KeyValueStore`].
///
/// Storage failures never propagate: unreadable or corrupt values load as
/// absent, and failed writes are logged and reported as `false`.
#[derive(Clone)]
pub struct LocalStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring unparsable value stored under {}: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("No value stored under {}", key);
                None
            }
            Err(e) => {
                warn!("Failed to load {}: {}", key, e);
                None
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize {}: {}", key, e);
                return false;
            }
        };
        match self.store.set(key, &raw) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save {}: {}", key, e);
                false
            }
        }
    }

    pub fn load_items(&self) -> Vec<Item> {
        self.load_json(ITEMS_KEY).unwrap_or_default()
    }

    pub fn save_items(&self, items: &[Item]) -> bool {
        self.save_json(ITEMS_KEY, items)
    }

    pub fn load_icons(&self) -> IconRegistry {
        self.load_json::<Vec<String>>(ICONS_KEY)
            .map(IconRegistry::from_glyphs)
            .unwrap_or_default()
    }

    pub fn save_icons(&self, icons: &IconRegistry) -> bool {
        self.save_json(ICONS_KEY, icons.as_slice())
    }

    pub fn load_inventory(&self) -> Inventory {
        Inventory::new(self.load_items(), self.load_icons())
    }

    /// Persists items and icons. Both writes are attempted.
    pub fn save_inventory(&self, inventory: &Inventory) -> bool {
        let items_saved = self.save_items(inventory.items());
        let icons_saved = self.save_icons(inventory.icons());
        items_saved && icons_saved
    }

    pub fn load_sync_config(&self) -> Option<SyncConfig> {
        self.load_json(SYNC_CONFIG_KEY)
    }

    pub fn save_sync_config(&self, config: &SyncConfig) -> bool {
        self.save_json(SYNC_CONFIG_KEY, config)
    }

    pub fn clear_sync_config(&self) -> bool {
        match self.store.remove(SYNC_CONFIG_KEY) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to clear {}: {}", SYNC_CONFIG_KEY, e);
                false
            }
        }
    }
}
