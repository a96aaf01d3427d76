use async_trait::async_trait;
use log::{debug, warn};
use valueof_core::sync::RemoteSnapshotStore;
use valueof_core::SyncError;

use crate::client::GistClient;
use crate::types::{CreateGistRequest, UpdateGistRequest};

/// Description given to gists created by this store.
pub const GIST_DESCRIPTION: &str = "ValueOf App Data Backup";

/// [`RemoteSnapshotStore`] backed by private GitHub gists.
#[derive(Debug, Clone)]
pub struct GistSnapshotStore {
    client: GistClient,
}

impl GistSnapshotStore {
    pub fn new(client: GistClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GistClient {
        &self.client
    }
}

#[async_trait]
impl RemoteSnapshotStore for GistSnapshotStore {
    async fn create_document(
        &self,
        token: &str,
        file_name: &str,
        content: String,
    ) -> Result<String, SyncError> {
        let req = CreateGistRequest::single_file(GIST_DESCRIPTION, file_name, content);
        let gist = self.client.create_gist(token, &req).await.map_err(|e| {
            warn!("Gist creation failed: {}", e);
            SyncError::from(e)
        })?;

        if gist.id.trim().is_empty() {
            return Err(SyncError::Protocol(
                "Gist created without an id".to_string(),
            ));
        }
        debug!("Created gist {}", gist.id);
        Ok(gist.id)
    }

    async fn update_document(
        &self,
        token: &str,
        document_id: &str,
        file_name: &str,
        content: String,
    ) -> Result<(), SyncError> {
        let req = UpdateGistRequest::single_file(file_name, content);
        self.client
            .update_gist(token, document_id, &req)
            .await
            .map_err(|e| {
                warn!("Gist update failed for {}: {}", document_id, e);
                SyncError::from(e)
            })?;
        Ok(())
    }

    async fn fetch_document_file(
        &self,
        token: &str,
        document_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, SyncError> {
        let gist = self.client.get_gist(token, document_id).await?;
        let content = self.client.file_content(token, &gist, file_name).await?;
        if content.is_none() {
            debug!("Gist {} has no file named {}", document_id, file_name);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_API_BASE_URL;

    #[tokio::test]
    async fn invalid_document_id_is_a_protocol_error() {
        let store = GistSnapshotStore::new(GistClient::new(DEFAULT_API_BASE_URL).unwrap());
        let err = store
            .update_document("ghp_abc", "../../user", "valueof_data.json", "{}".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Protocol(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn blank_token_is_rejected_before_any_request() {
        let store = GistSnapshotStore::new(GistClient::new(DEFAULT_API_BASE_URL).unwrap());
        let err = store
            .create_document("  ", "valueof_data.json", "{}".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }
}
