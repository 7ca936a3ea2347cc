//! GitHub content API client.
//!
//! The pipeline's only outbound HTTP call: fetch a single file's encoded
//! content from a repository. The `ContentService` trait is the seam the
//! pipeline depends on; tests substitute a recording mock.

use async_trait::async_trait;
use jig_core::error::{JigError, Result};
use serde::{Deserialize, Serialize};

/// Accept header for the content API.
const ACCEPT_CONTENT: &str = "application/vnd.github.v3+json";

/// File payload returned by the content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubContent {
    /// File name
    #[serde(default)]
    pub name: Option<String>,
    /// Repository-relative file path
    #[serde(default)]
    pub path: Option<String>,
    /// Encoded file body (absent for directories)
    #[serde(default)]
    pub content: Option<String>,
    /// Encoding of `content`, normally "base64"
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Retrieves file content from a code-hosting service.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Fetch one file from a repository.
    async fn file_content(&self, owner: &str, repo: &str, path: &str) -> Result<GitHubContent>;
}

/// `ContentService` backed by the GitHub REST API.
pub struct GitHubContentClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubContentClient {
    /// Create a client against the given API base URL
    /// (e.g., "https://api.github.com").
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl ContentService for GitHubContentClient {
    async fn file_content(&self, owner: &str, repo: &str, path: &str) -> Result<GitHubContent> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, owner, repo, path
        );

        tracing::debug!(url = %url, "Requesting file content");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_CONTENT)
            .header(
                reqwest::header::USER_AGENT,
                concat!("jig/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| JigError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(JigError::Fetch {
                url,
                message: format!("HTTP {}", response.status()),
            });
        }

        response.json::<GitHubContent>().await.map_err(|e| JigError::Fetch {
            url,
            message: format!("invalid content payload: {}", e),
        })
    }
}
