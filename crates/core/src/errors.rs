//! Error types for the ValueOf core crate.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for every core operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed user input. The attempted operation is aborted without any state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Price must be greater than zero, got {0}")]
    NonPositivePrice(String),

    #[error("Price {0} has more digits than a backup can hold")]
    UnrepresentablePrice(String),

    #[error("Usage count must be at least 1 for per-use items, got {0}")]
    InvalidUsageCount(i64),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Icon must not be empty")]
    EmptyIcon,

    #[error("Icon already exists: {0}")]
    DuplicateIcon(String),

    #[error("Icon not found: {0}")]
    IconNotFound(String),

    #[error("Cannot remove the last remaining icon")]
    LastIcon,

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown calculation method: {0}")]
    UnknownCalcMethod(String),
}

/// A snapshot payload that could not be accepted. Nothing is applied when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Payload has no items field")]
    MissingItems,

    #[error("Payload items field is not an array")]
    ItemsNotArray,

    #[error("Payload icons field must be an array of strings")]
    InvalidIcons,

    #[error("Item at index {index} is invalid: {message}")]
    InvalidItem { index: usize, message: String },

    #[error("Duplicate item id in payload: {0}")]
    DuplicateItemId(String),
}

/// Failures of push/pull/import/export. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("No sync token configured")]
    MissingToken,

    #[error("No remote document linked")]
    NotLinked,

    #[error("Remote document has no data file")]
    MissingDataFile,

    #[error("Remote error ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        retryable: bool,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote answered with something this client does not understand.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Cannot access {path}: {message}")]
    FileAccess { path: String, message: String },
}

impl SyncError {
    /// Create a remote status error.
    pub fn remote(status: u16, message: impl Into<String>, retryable: bool) -> Self {
        Self::Remote {
            status,
            message: message.into(),
            retryable,
        }
    }

    /// Create a file access error for the given path.
    pub fn file_access(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::FileAccess {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP status if this is a remote error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether trying the same operation again later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Remote { retryable, .. } => *retryable,
            Self::Transport(_) => true,
            _ => false,
        }
    }
}

/// Local key-value persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Failed to read key {key}: {message}")]
    Read { key: String, message: String },

    #[error("Failed to write key {key}: {message}")]
    Write { key: String, message: String },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_exposes_status_and_retry_hint() {
        let err = SyncError::remote(503, "Service Unavailable", true);
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_retryable());
        assert!(!SyncError::MissingDataFile.is_retryable());
    }

    #[test]
    fn sub_errors_convert_into_core_error() {
        let err: Error = DecodeError::MissingItems.into();
        assert!(matches!(err, Error::Decode(DecodeError::MissingItems)));
        assert_eq!(err.to_string(), "Decode error: Payload has no items field");
    }
}
