use thiserror::Error;

/// Jig error types
#[derive(Error, Debug)]
pub enum JigError {
    /// Script reference URI could not be parsed
    #[error("Invalid script reference: {0}")]
    InvalidReference(String),

    /// No resolution strategy matched the reference
    #[error("No base image found for URI {uri}")]
    BaseImageNotFound { uri: String },

    /// Script retrieval failed (network, decode, or staging)
    #[error("Script fetch failed: {url} - {message}")]
    Fetch { url: String, message: String },

    /// Image build delegate failure
    #[error("Image build failed: {message}")]
    BuildEngine { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JigError {
    /// Whether the pipeline continues with an empty result instead of
    /// aborting. Only fetch failures are recoverable; everything else
    /// terminates the build request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JigError::Fetch { .. })
    }
}

impl From<serde_json::Error> for JigError {
    fn from(err: serde_json::Error) -> Self {
        JigError::Serialization(err.to_string())
    }
}

/// Result type alias for jig operations
pub type Result<T> = std::result::Result<T, JigError>;
