//! Request and response shapes of the GitHub Gist REST API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// File content sent on create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistFileContent {
    pub content: String,
}

/// POST /gists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGistRequest {
    pub description: String,
    pub public: bool,
    pub files: HashMap<String, GistFileContent>,
}

/// PATCH /gists/{gist_id}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGistRequest {
    pub files: HashMap<String, GistFileContent>,
}

impl CreateGistRequest {
    /// Private gist holding a single file.
    pub fn single_file(description: &str, file_name: &str, content: String) -> Self {
        Self {
            description: description.to_string(),
            public: false,
            files: HashMap::from([(file_name.to_string(), GistFileContent { content })]),
        }
    }
}

impl UpdateGistRequest {
    pub fn single_file(file_name: &str, content: String) -> Self {
        Self {
            files: HashMap::from([(file_name.to_string(), GistFileContent { content })]),
        }
    }
}

/// A file as returned by GET /gists/{gist_id}.
///
/// Content above the API's inline limit arrives with `truncated = true` and
/// must be read from `raw_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistFile {
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub files: HashMap<String, GistFile>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
