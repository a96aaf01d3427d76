use serde::{Deserialize, Serialize};

/// Credentials and the linked remote document, persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    pub token: String,
    #[serde(default, alias = "gistId")]
    pub document_id: Option<String>,
}

impl SyncConfig {
    pub fn new(token: impl Into<String>, document_id: Option<String>) -> Self {
        Self {
            token: token.into().trim().to_string(),
            document_id: document_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// The linked document id, ignoring blank values from older configs.
    pub fn linked_document(&self) -> Option<&str> {
        self.document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Where the local installation stands with respect to remote sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// No token stored.
    Unconfigured,
    /// Token stored, no remote document yet.
    Configured,
    /// Token stored and a remote document is known.
    Linked,
}

impl SyncState {
    pub fn of(config: Option<&SyncConfig>) -> Self {
        match config {
            Some(config) if config.has_token() => {
                if config.linked_document().is_some() {
                    SyncState::Linked
                } else {
                    SyncState::Configured
                }
            }
            _ => SyncState::Unconfigured,
        }
    }
}
