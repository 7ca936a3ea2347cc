//! The script-to-image pipeline.
//!
//! One `ImageBuilder` is constructed at startup with its collaborators
//! (content service, build engine) and reused for every build request.
//! A request flows through parse, base-image resolution, naming, fetch,
//! assembly, and the delegated build. Resolution is checked before any
//! remote I/O; a fetch failure is recoverable and yields no image, while
//! reference, resolution, and build failures abort the request.

use std::sync::Arc;

use jig_core::config::BuilderConfig;
use jig_core::error::{JigError, Result};

use crate::engine::{BuildService, DockerCliBuild};
use crate::fetch::ScriptFetcher;
use crate::github::{ContentService, GitHubContentClient};
use crate::naming::ScriptNaming;
use crate::reference::ScriptReference;
use crate::resolve::BaseImageResolver;
use crate::spec::ImageSpec;

/// Builds container images from remote script references.
pub struct ImageBuilder {
    config: BuilderConfig,
    resolver: BaseImageResolver,
    fetcher: ScriptFetcher,
    engine: Arc<dyn BuildService>,
}

impl ImageBuilder {
    /// Create a builder with explicit collaborators.
    pub fn new(
        config: BuilderConfig,
        content: Arc<dyn ContentService>,
        engine: Arc<dyn BuildService>,
    ) -> Self {
        let fetcher = ScriptFetcher::new(content, config.staging_dir.clone());
        Self {
            config,
            resolver: BaseImageResolver::default(),
            fetcher,
            engine,
        }
    }

    /// Default wiring: GitHub content client and the docker CLI engine.
    pub fn from_config(config: BuilderConfig) -> Self {
        let content = Arc::new(GitHubContentClient::new(config.api_base.clone()));
        let engine = Arc::new(DockerCliBuild::new(config.staging_dir.clone()));
        Self::new(config, content, engine)
    }

    /// Replace the base-image resolver.
    pub fn with_resolver(mut self, resolver: BaseImageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Run the full pipeline for one script URI.
    ///
    /// Returns the built image name, or `None` when the script could not
    /// be fetched (the failure is logged, not raised). An unparsable URI
    /// or an unresolvable base image aborts before any remote call; a
    /// build-engine failure propagates.
    pub async fn build(&self, uri: &str) -> Result<Option<String>> {
        let reference = ScriptReference::parse(uri)?;

        let base_image = self
            .resolver
            .resolve(&reference)
            .ok_or_else(|| JigError::BaseImageNotFound {
                uri: uri.to_string(),
            })?
            .to_string();

        tracing::debug!(
            host = %reference.host,
            script = %reference.script_filename,
            base = %base_image,
            "Resolved script reference"
        );

        let naming = ScriptNaming::derive(&reference, self.config.repo_prefix.as_deref());

        let staged = match self.fetcher.fetch(&reference, &naming).await {
            Ok(staged) => staged,
            Err(e) if e.is_recoverable() => {
                tracing::error!(
                    url = %naming.download_url,
                    error = %e,
                    "Script download failed, no image will be built"
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let spec = ImageSpec::assemble(&base_image, &naming.image_name, &naming, &staged);

        self.engine.build(&spec).await?;
        let image_id = self.engine.image_id(&naming.image_name).await?;

        tracing::info!(
            image = %naming.image_name,
            id = %image_id,
            "Image built successfully"
        );

        Ok(Some(naming.image_name))
    }
}
