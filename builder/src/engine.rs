//! Build engine seam.
//!
//! The pipeline delegates the actual image construction through the
//! `BuildService` trait. The default implementation drives the local
//! `docker` CLI over a build context rendered from the image spec.

use std::path::PathBuf;

use async_trait::async_trait;
use jig_core::error::{JigError, Result};
use tokio::process::Command;

use crate::spec::ImageSpec;

/// Executes image builds and reports image identifiers.
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Build and tag an image from the spec.
    async fn build(&self, spec: &ImageSpec) -> Result<()>;

    /// Look up the identifier of a built image.
    async fn image_id(&self, image_name: &str) -> Result<String>;
}

/// Build engine backed by the local `docker` CLI.
pub struct DockerCliBuild {
    /// Directory where per-build contexts are materialized.
    context_root: PathBuf,
}

impl DockerCliBuild {
    /// Create an engine materializing build contexts under `context_root`.
    pub fn new(context_root: impl Into<PathBuf>) -> Self {
        Self {
            context_root: context_root.into(),
        }
    }

    /// Write the Dockerfile and staged script into a fresh build context.
    async fn prepare_context(&self, spec: &ImageSpec) -> Result<PathBuf> {
        let context_dir = self
            .context_root
            .join(format!("jig-build-{}", sanitize_name(&spec.image_name)));

        tokio::fs::create_dir_all(&context_dir)
            .await
            .map_err(|e| JigError::BuildEngine {
                message: format!("failed to create build context: {}", e),
            })?;

        let file_name = spec.script_file_name().ok_or_else(|| JigError::BuildEngine {
            message: format!(
                "staged script has no file name: {}",
                spec.assembly.source_file.display()
            ),
        })?;

        tokio::fs::copy(&spec.assembly.source_file, context_dir.join(file_name))
            .await
            .map_err(|e| JigError::BuildEngine {
                message: format!("failed to copy script into build context: {}", e),
            })?;

        tokio::fs::write(context_dir.join("Dockerfile"), spec.to_dockerfile())
            .await
            .map_err(|e| JigError::BuildEngine {
                message: format!("failed to write Dockerfile: {}", e),
            })?;

        Ok(context_dir)
    }
}

#[async_trait]
impl BuildService for DockerCliBuild {
    async fn build(&self, spec: &ImageSpec) -> Result<()> {
        let context_dir = self.prepare_context(spec).await?;

        tracing::info!(
            image = %spec.image_name,
            from = %spec.base_image,
            context = %context_dir.display(),
            "Building image"
        );

        let output = Command::new("docker")
            .arg("build")
            .arg("-t")
            .arg(&spec.image_name)
            .arg(&context_dir)
            .output()
            .await
            .map_err(|e| JigError::BuildEngine {
                message: format!("failed to run docker build: {}", e),
            })?;

        if !output.status.success() {
            return Err(JigError::BuildEngine {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    async fn image_id(&self, image_name: &str) -> Result<String> {
        let output = Command::new("docker")
            .args(["images", "-q", image_name])
            .output()
            .await
            .map_err(|e| JigError::BuildEngine {
                message: format!("failed to run docker images: {}", e),
            })?;

        if !output.status.success() {
            return Err(JigError::BuildEngine {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(JigError::BuildEngine {
                message: format!("no image id found for {}", image_name),
            });
        }

        Ok(id)
    }
}

/// Flatten an image name into a path-safe directory component.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == ':' { '-' } else { c })
        .collect()
}
