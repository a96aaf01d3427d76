//! Gist API client used for remote backups.
//!
//! Only the three calls the backup flow needs are implemented: create,
//! update and read of a single gist.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::error::{GistError, Result};
use crate::types::*;

/// Public GitHub API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("valueof/", env!("CARGO_PKG_VERSION"));

fn body_preview(body: &str) -> String {
    let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
    if body.chars().count() > MAX_LOG_BODY_CHARS {
        preview.push_str("...");
    }
    preview
}

/// Gist ids are hex strings; anything else would escape the URL path.
fn is_valid_gist_id(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Client for the GitHub Gist REST API.
#[derive(Debug, Clone)]
pub struct GistClient {
    client: reqwest::Client,
    base_url: String,
}

impl GistClient {
    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }
        debug!("API response error ({}): {}", status, body_preview(body));
    }

    /// Create a new gist client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (e.g., "https://api.github.com")
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create headers for an API request.
    fn headers(&self, token: &str) -> Result<HeaderMap> {
        let token = token.trim();
        if token.is_empty() {
            return Err(GistError::auth("Missing access token"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| GistError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    fn gist_url(&self, gist_id: &str) -> Result<String> {
        if !is_valid_gist_id(gist_id) {
            return Err(GistError::invalid_request(format!(
                "Invalid gist id: {:?}",
                gist_id
            )));
        }
        Ok(format!("{}/gists/{}", self.base_url, gist_id))
    }

    /// Read the body and turn non-2xx statuses into API errors.
    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(GistError::api(status.as_u16(), error.message));
            }
            return Err(GistError::api(
                status.as_u16(),
                format!("Request failed: {}", body_preview(&body)),
            ));
        }

        Ok(body)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body_preview(&body),
                e
            );
            GistError::Json(e)
        })
    }

    /// Create a gist.
    ///
    /// POST /gists
    pub async fn create_gist(&self, token: &str, req: &CreateGistRequest) -> Result<Gist> {
        let url = format!("{}/gists", self.base_url);
        debug!("Creating gist with {} file(s)", req.files.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers(token)?)
            .json(req)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Replace the content of files in a gist.
    ///
    /// PATCH /gists/{gist_id}
    pub async fn update_gist(
        &self,
        token: &str,
        gist_id: &str,
        req: &UpdateGistRequest,
    ) -> Result<Gist> {
        let url = self.gist_url(gist_id)?;
        debug!("Updating gist {}", gist_id);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers(token)?)
            .json(req)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Get a gist with its files.
    ///
    /// GET /gists/{gist_id}
    pub async fn get_gist(&self, token: &str, gist_id: &str) -> Result<Gist> {
        let url = self.gist_url(gist_id)?;
        debug!("Fetching gist {}", gist_id);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(token)?)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Download the full content of a truncated file.
    pub async fn get_raw_file(&self, token: &str, raw_url: &str) -> Result<String> {
        debug!("Fetching raw gist file {}", raw_url);

        let response = self
            .client
            .get(raw_url)
            .headers(self.headers(token)?)
            .send()
            .await?;

        Self::read_body(response).await
    }

    /// Full content of `file_name` in `gist`, or `None` when the gist has no such file.
    pub async fn file_content(
        &self,
        token: &str,
        gist: &Gist,
        file_name: &str,
    ) -> Result<Option<String>> {
        let Some(file) = gist.files.get(file_name) else {
            return Ok(None);
        };

        match (&file.content, file.truncated) {
            (Some(content), false) => Ok(Some(content.clone())),
            _ => {
                let raw_url = file.raw_url.as_deref().ok_or_else(|| {
                    GistError::invalid_request(format!(
                        "File {} has no inline content and no raw_url",
                        file_name
                    ))
                })?;
                self.get_raw_file(token, raw_url).await.map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn gist_with(file: GistFile) -> Gist {
        Gist {
            id: "abc123".to_string(),
            description: None,
            public: false,
            files: HashMap::from([("valueof_data.json".to_string(), file)]),
            updated_at: None,
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = GistClient::new("https://api.github.com/ ").unwrap();
        assert_eq!(client.base_url(), "https://api.github.com");
    }

    #[test]
    fn headers_carry_bearer_token_and_api_version() {
        let client = GistClient::new(DEFAULT_API_BASE_URL).unwrap();
        let headers = client.headers(" ghp_abc ").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer ghp_abc");
        assert_eq!(headers[ACCEPT], GITHUB_ACCEPT);
        assert_eq!(headers["x-github-api-version"], GITHUB_API_VERSION);
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn blank_or_malformed_token_is_an_auth_error() {
        let client = GistClient::new(DEFAULT_API_BASE_URL).unwrap();
        assert!(matches!(client.headers("  "), Err(GistError::Auth(_))));
        assert!(matches!(client.headers("bad\ntoken"), Err(GistError::Auth(_))));
    }

    #[test]
    fn gist_ids_are_validated_before_building_urls() {
        let client = GistClient::new(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(
            client.gist_url("aa5a315d61ae9438b18d").unwrap(),
            "https://api.github.com/gists/aa5a315d61ae9438b18d"
        );
        assert!(matches!(
            client.gist_url("../users"),
            Err(GistError::InvalidRequest(_))
        ));
        assert!(client.gist_url("").is_err());
    }

    #[test]
    fn long_bodies_are_truncated_for_logging() {
        let body = "x".repeat(MAX_LOG_BODY_CHARS + 10);
        let preview = body_preview(&body);
        assert_eq!(preview.len(), MAX_LOG_BODY_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(body_preview("short"), "short");
    }

    #[tokio::test]
    async fn inline_file_content_is_used_directly() {
        let client = GistClient::new(DEFAULT_API_BASE_URL).unwrap();
        let gist = gist_with(GistFile {
            filename: Some("valueof_data.json".to_string()),
            content: Some("{\"items\":[]}".to_string()),
            truncated: false,
            raw_url: None,
            size: Some(12),
        });

        let content = client
            .file_content("ghp_abc", &gist, "valueof_data.json")
            .await
            .unwrap();
        assert_eq!(content.as_deref(), Some("{\"items\":[]}"));
        assert_eq!(
            client.file_content("ghp_abc", &gist, "other.json").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn truncated_file_without_raw_url_is_rejected() {
        let client = GistClient::new(DEFAULT_API_BASE_URL).unwrap();
        let gist = gist_with(GistFile {
            filename: Some("valueof_data.json".to_string()),
            content: Some("{\"items\":[".to_string()),
            truncated: true,
            raw_url: None,
            size: Some(2_000_000),
        });

        let err = client
            .file_content("ghp_abc", &gist, "valueof_data.json")
            .await
            .unwrap_err();
        assert!(matches!(err, GistError::InvalidRequest(_)));
    }
}
