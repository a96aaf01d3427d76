//! SQLite persistence for the ValueOf local store.
//!
//! The core only needs an independent key per collection, so the database
//! holds a single `kv_store` table of JSON text values.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use valueof_core::storage::KeyValueStore;
use valueof_core::StorageError;

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "valueof.db";

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

/// [`KeyValueStore`] backed by a single SQLite connection.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Unavailable(format!("open {}: {}", path.display(), e)))?;
        Self::init_with_connection(conn)
    }

    /// Open `valueof.db` inside `dir`, creating the directory if needed.
    pub fn open_in_dir(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StorageError::Unavailable(format!("create {}: {}", dir.display(), e)))?;
        Self::open(&dir.join(DB_FILE_NAME))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Unavailable(format!("open_in_memory: {}", e)))?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError::Unavailable(format!("init_schema: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
