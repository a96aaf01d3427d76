use async_trait::async_trait;

use crate::errors::SyncError;

/// Remote document store holding named text files, addressed by an opaque
/// document id and authenticated with a bearer token.
#[async_trait]
pub trait RemoteSnapshotStore: Send + Sync {
    /// Creates a new document containing one file and returns its id.
    async fn create_document(
        &self,
        token: &str,
        file_name: &str,
        content: String,
    ) -> Result<String, SyncError>;

    /// Overwrites one file of an existing document.
    async fn update_document(
        &self,
        token: &str,
        document_id: &str,
        file_name: &str,
        content: String,
    ) -> Result<(), SyncError>;

    /// Reads one file of a document. `Ok(None)` when the document exists but
    /// has no such file.
    async fn fetch_document_file(
        &self,
        token: &str,
        document_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, SyncError>;
}
