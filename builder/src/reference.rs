//! Script reference parsing.
//!
//! Decomposes script URIs like `https://raw.example.com/acme/tools/scripts/hello.java`
//! into host, path segments, and the script filename.

use jig_core::error::{JigError, Result};

/// Parsed script reference.
///
/// `segments` is the raw `/`-split of the URI path: the leading empty
/// segment is preserved so that the repository owner sits at index 1 and
/// the repository name at index 2. Trailing empty segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReference {
    /// Host the script is served from (e.g., "raw.githubusercontent.com")
    pub host: String,
    /// Path segments, split on `/`
    pub segments: Vec<String>,
    /// The script filename: last non-empty path segment
    pub script_filename: String,
}

impl ScriptReference {
    /// Parse a script URI.
    ///
    /// Supports `https://<host>/<owner>/<repo>/<path...>/<script>` style
    /// references, with or without a source extension on the final
    /// segment. Fails when the URI has no scheme, no host, or no
    /// non-empty path segments.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(JigError::InvalidReference("empty URI".to_string()));
        }

        let rest = uri
            .split_once("://")
            .map(|(_, rest)| rest)
            .ok_or_else(|| {
                JigError::InvalidReference(format!("missing scheme in '{}'", uri))
            })?;

        let (host, path) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };

        if host.is_empty() {
            return Err(JigError::InvalidReference(format!(
                "missing host in '{}'",
                uri
            )));
        }

        let mut segments: Vec<String> = path.split('/').map(|s| s.to_string()).collect();

        // Drop trailing empty segments so the last element is the filename
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        let script_filename = segments
            .iter()
            .rev()
            .find(|s| !s.is_empty())
            .cloned()
            .ok_or_else(|| {
                JigError::InvalidReference(format!("no path segments in '{}'", uri))
            })?;

        Ok(ScriptReference {
            host: host.to_string(),
            segments,
            script_filename,
        })
    }

    /// The URI path, reassembled from the segments.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

impl std::fmt::Display for ScriptReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.host, self.path())
    }
}
