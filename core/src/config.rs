use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default content-hosting API endpoint.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable carrying the container repository prefix.
const CONTAINER_REPO_ENV: &str = "JIG_CONTAINER_REPO";

/// Builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Container repository prefix prepended to image names
    /// (e.g., "registry.local/jo"). Affects image naming only.
    pub repo_prefix: Option<String>,

    /// Directory where fetched scripts are staged before a build
    pub staging_dir: PathBuf,

    /// Base URL of the content-hosting API
    pub api_base: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            repo_prefix: None,
            staging_dir: std::env::temp_dir(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl BuilderConfig {
    /// Create a configuration from the environment.
    ///
    /// Reads `JIG_CONTAINER_REPO` for the repository prefix.
    /// Falls back to defaults for everything else.
    pub fn from_env() -> Self {
        Self {
            repo_prefix: std::env::var(CONTAINER_REPO_ENV).ok().filter(|s| !s.is_empty()),
            ..Self::default()
        }
    }

    /// Set the repository prefix.
    pub fn with_repo_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.repo_prefix = Some(prefix.into());
        self
    }

    /// Set the staging directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}
