//! Local persistence of the inventory, icon registry and sync configuration.

mod local_store;
mod memory_store;

pub use local_store::*;
pub use memory_store::*;

use crate::errors::StorageError;

/// Opaque string key-value store backing the local state.
///
/// Implementations should be cheap to share across threads.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
