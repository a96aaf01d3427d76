//! Core domain of ValueOf: owned items, amortized cost figures, sorted
//! views, and whole-collection backup/restore.

pub mod errors;
pub mod icons;
pub mod items;
pub mod snapshot;
pub mod sort;
pub mod storage;
pub mod sync;
pub mod utils;
pub mod valuation;

pub use errors::{DecodeError, Error, Result, StorageError, SyncError, ValidationError};
