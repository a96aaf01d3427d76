//! Error types for the gist sync crate.

use thiserror::Error;
use valueof_core::SyncError;

/// Result type alias for gist operations.
pub type Result<T> = std::result::Result<T, GistError>;

/// Retry policy class for API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRetryClass {
    Retryable,
    Permanent,
    ReauthRequired,
}

/// Errors that can occur while talking to the Gist API.
#[derive(Debug, Error)]
pub enum GistError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (missing required data, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error (missing or malformed token)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl GistError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify error for retry policy.
    pub fn retry_class(&self) -> ApiRetryClass {
        match self {
            Self::Api { status, .. } => match *status {
                401 => ApiRetryClass::ReauthRequired,
                // GitHub answers 403 both for bad scopes and for rate limiting.
                403 if self.is_rate_limited() => ApiRetryClass::Retryable,
                403 => ApiRetryClass::ReauthRequired,
                408 | 409 | 429 => ApiRetryClass::Retryable,
                500..=599 => ApiRetryClass::Retryable,
                _ => ApiRetryClass::Permanent,
            },
            Self::Http(_) => ApiRetryClass::Retryable,
            Self::Json(_) => ApiRetryClass::Permanent,
            Self::InvalidRequest(_) => ApiRetryClass::Permanent,
            Self::Auth(_) => ApiRetryClass::ReauthRequired,
        }
    }

    /// Returns true when the API rejected the call because of rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Api { status, message } => {
                (*status == 403 || *status == 429)
                    && message.to_ascii_lowercase().contains("rate limit")
            }
            _ => false,
        }
    }
}

impl From<GistError> for SyncError {
    fn from(err: GistError) -> Self {
        let retryable = err.retry_class() == ApiRetryClass::Retryable;
        match err {
            GistError::Api { status, message } => SyncError::remote(status, message, retryable),
            GistError::Http(e) => SyncError::Transport(e.to_string()),
            GistError::Json(e) => SyncError::Protocol(format!("Unexpected response body: {}", e)),
            GistError::InvalidRequest(message) => SyncError::Protocol(message),
            GistError::Auth(message) => SyncError::remote(401, message, false),
        }
    }
}
