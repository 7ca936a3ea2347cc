//! Remote script retrieval and staging.
//!
//! Derives the repository coordinates from the parsed reference, pulls
//! the encoded file body through the content API, decodes it, and writes
//! the script to the staging directory. Every failure here maps to the
//! recoverable fetch error: the pipeline reports "no image" instead of
//! aborting.

use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use jig_core::error::{JigError, Result};

use crate::github::ContentService;
use crate::naming::{ScriptNaming, SOURCE_EXTENSION};
use crate::reference::ScriptReference;

/// Repository coordinates derived from a script reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Repository owner (segment 1 of the URI path)
    pub repo_owner: String,
    /// Repository name (segment 2)
    pub repo_name: String,
    /// Repository-relative file path (segments 3..), extension-normalized
    pub file_path: String,
    /// Raw download URL, used for error reporting
    pub download_url: String,
}

impl ResolvedSource {
    /// Derive repository coordinates from a reference.
    ///
    /// The file path is normalized to end with the source extension
    /// before it reaches the content API.
    pub fn derive(reference: &ScriptReference, naming: &ScriptNaming) -> Result<Self> {
        if reference.segments.len() < 4 {
            return Err(JigError::Fetch {
                url: naming.download_url.clone(),
                message: "reference does not contain owner/repository/path".to_string(),
            });
        }

        let mut file_path = reference.segments[3..].join("/");
        if !file_path.ends_with(SOURCE_EXTENSION) {
            file_path.push_str(SOURCE_EXTENSION);
        }

        Ok(ResolvedSource {
            repo_owner: reference.segments[1].clone(),
            repo_name: reference.segments[2].clone(),
            file_path,
            download_url: naming.download_url.clone(),
        })
    }
}

/// A script materialized on local storage, ready for assembly.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Where the decoded script was written
    pub path: PathBuf,
    /// Decoded script text
    pub content: String,
}

/// Fetches remote scripts and stages them for the build.
pub struct ScriptFetcher {
    service: Arc<dyn ContentService>,
    staging_dir: PathBuf,
}

impl ScriptFetcher {
    /// Create a fetcher writing into the given staging directory.
    pub fn new(service: Arc<dyn ContentService>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            staging_dir: staging_dir.into(),
        }
    }

    /// Fetch the script behind `reference` and write it under the staging
    /// directory at the derived destination path, creating parent
    /// directories as needed.
    ///
    /// Directories created before a failure are not removed.
    pub async fn fetch(
        &self,
        reference: &ScriptReference,
        naming: &ScriptNaming,
    ) -> Result<StagedFile> {
        let source = ResolvedSource::derive(reference, naming)?;

        tracing::debug!(
            owner = %source.repo_owner,
            repo = %source.repo_name,
            path = %source.file_path,
            "Fetching script content"
        );

        let payload = self
            .service
            .file_content(&source.repo_owner, &source.repo_name, &source.file_path)
            .await?;

        let encoded = payload.content.ok_or_else(|| JigError::Fetch {
            url: source.download_url.clone(),
            message: "no content in API response".to_string(),
        })?;

        let decoded = decode_content(&encoded).map_err(|message| JigError::Fetch {
            url: source.download_url.clone(),
            message,
        })?;

        let path = self
            .staging_dir
            .join(naming.destination_file.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| JigError::Fetch {
                    url: source.download_url.clone(),
                    message: format!("failed to create staging directory: {}", e),
                })?;
        }

        tokio::fs::write(&path, &decoded)
            .await
            .map_err(|e| JigError::Fetch {
                url: source.download_url.clone(),
                message: format!("failed to write staged script: {}", e),
            })?;

        tracing::debug!(path = %path.display(), "Staged script");

        Ok(StagedFile {
            path,
            content: decoded,
        })
    }
}

/// Decode a base64 file body into script text.
///
/// The content API wraps long bodies in newlines; strip them before
/// decoding.
fn decode_content(encoded: &str) -> std::result::Result<String, String> {
    let compact: String = encoded
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64 content: {}", e))?;

    String::from_utf8(bytes).map_err(|e| format!("script is not valid UTF-8: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubContent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StaticContent {
        content: Option<String>,
        calls: AtomicUsize,
    }

    impl StaticContent {
        fn new(content: Option<&str>) -> Self {
            Self {
                content: content.map(|s| s.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ContentService for StaticContent {
        async fn file_content(
            &self,
            _owner: &str,
            _repo: &str,
            _path: &str,
        ) -> Result<GitHubContent> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GitHubContent {
                name: None,
                path: None,
                content: self.content.clone(),
                encoding: Some("base64".to_string()),
            })
        }
    }

    struct FailingContent;

    #[async_trait]
    impl ContentService for FailingContent {
        async fn file_content(
            &self,
            _owner: &str,
            _repo: &str,
            _path: &str,
        ) -> Result<GitHubContent> {
            Err(JigError::Fetch {
                url: "https://api.example.com".to_string(),
                message: "HTTP 404 Not Found".to_string(),
            })
        }
    }

    fn parsed(uri: &str) -> (ScriptReference, ScriptNaming) {
        let reference = ScriptReference::parse(uri).unwrap();
        let naming = ScriptNaming::derive(&reference, None);
        (reference, naming)
    }

    const HELLO_B64: &str = "Y2xhc3MgSGVsbG8ge30="; // "class Hello {}"

    #[test]
    fn test_derive_source_coordinates() {
        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/scripts/hello.java");
        let source = ResolvedSource::derive(&reference, &naming).unwrap();
        assert_eq!(source.repo_owner, "acme");
        assert_eq!(source.repo_name, "tools");
        assert_eq!(source.file_path, "scripts/hello.java");
    }

    #[test]
    fn test_derive_source_appends_extension() {
        let (reference, naming) = parsed("https://raw.example.com/acme/tools/scripts/hello");
        let source = ResolvedSource::derive(&reference, &naming).unwrap();
        assert_eq!(source.file_path, "scripts/hello.java");
    }

    #[test]
    fn test_derive_source_nested_path() {
        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/a/b/c/hello.java");
        let source = ResolvedSource::derive(&reference, &naming).unwrap();
        assert_eq!(source.file_path, "a/b/c/hello.java");
    }

    #[test]
    fn test_derive_source_too_short() {
        let (reference, naming) = parsed("https://raw.example.com/acme/hello.java");
        let err = ResolvedSource::derive(&reference, &naming).unwrap_err();
        assert!(matches!(err, JigError::Fetch { .. }));
    }

    #[test]
    fn test_decode_content() {
        assert_eq!(decode_content(HELLO_B64).unwrap(), "class Hello {}");
    }

    #[test]
    fn test_decode_content_with_embedded_newlines() {
        let wrapped = "Y2xhc3Mg\nSGVsbG8g\r\ne30=";
        assert_eq!(decode_content(wrapped).unwrap(), decode_content("Y2xhc3MgSGVsbG8ge30=").unwrap());
    }

    #[test]
    fn test_decode_content_invalid_base64() {
        assert!(decode_content("not base64 !!!").is_err());
    }

    #[tokio::test]
    async fn test_fetch_stages_decoded_script() {
        let tmp = TempDir::new().unwrap();
        let service = Arc::new(StaticContent::new(Some(HELLO_B64)));
        let fetcher = ScriptFetcher::new(service.clone(), tmp.path());

        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/scripts/hello.java");
        let staged = fetcher.fetch(&reference, &naming).await.unwrap();

        assert_eq!(staged.content, "class Hello {}");
        assert_eq!(
            staged.path,
            tmp.path().join("acme-tools-scripts/hello.java")
        );
        let on_disk = std::fs::read_to_string(&staged.path).unwrap();
        assert_eq!(on_disk, "class Hello {}");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let service = Arc::new(StaticContent::new(Some(HELLO_B64)));
        let fetcher = ScriptFetcher::new(service, tmp.path());

        let (reference, naming) = parsed("https://raw.example.com/acme/tools/a/b/hello");
        let staged = fetcher.fetch(&reference, &naming).await.unwrap();

        assert!(tmp.path().join("acme-tools-a-b").is_dir());
        assert!(staged.path.ends_with("acme-tools-a-b/hello.java"));
    }

    #[tokio::test]
    async fn test_fetch_missing_content_is_fetch_error() {
        let tmp = TempDir::new().unwrap();
        let service = Arc::new(StaticContent::new(None));
        let fetcher = ScriptFetcher::new(service, tmp.path());

        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/scripts/hello.java");
        let err = fetcher.fetch(&reference, &naming).await.unwrap_err();
        assert!(matches!(err, JigError::Fetch { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_fetch_propagates_api_failure_as_fetch_error() {
        let tmp = TempDir::new().unwrap();
        let fetcher = ScriptFetcher::new(Arc::new(FailingContent), tmp.path());

        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/scripts/hello.java");
        let err = fetcher.fetch(&reference, &naming).await.unwrap_err();
        assert!(matches!(err, JigError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_base64_is_fetch_error() {
        let tmp = TempDir::new().unwrap();
        let service = Arc::new(StaticContent::new(Some("!!! not base64 !!!")));
        let fetcher = ScriptFetcher::new(service, tmp.path());

        let (reference, naming) =
            parsed("https://raw.example.com/acme/tools/scripts/hello.java");
        let err = fetcher.fetch(&reference, &naming).await.unwrap_err();
        assert!(matches!(err, JigError::Fetch { .. }));
    }
}
