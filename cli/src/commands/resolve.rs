//! `jig resolve` command — Dry-run name and base-image resolution.
//!
//! Parses the URI and prints every derived value without touching the
//! network or the build engine.

use clap::Args;

use jig_builder::{BaseImageResolver, ScriptNaming, ScriptReference};
use jig_core::{BuilderConfig, JigError};

#[derive(Args)]
pub struct ResolveArgs {
    /// Script URI to inspect
    pub uri: String,

    /// Container repository prefix prepended to image names
    /// (overrides JIG_CONTAINER_REPO)
    #[arg(long = "repo-prefix")]
    pub repo_prefix: Option<String>,
}

pub async fn execute(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BuilderConfig::from_env();
    if let Some(prefix) = args.repo_prefix {
        config = config.with_repo_prefix(prefix);
    }

    let reference = ScriptReference::parse(&args.uri)?;

    let resolver = BaseImageResolver::default();
    let base_image = resolver
        .resolve(&reference)
        .ok_or_else(|| JigError::BaseImageNotFound {
            uri: args.uri.clone(),
        })?;

    let naming = ScriptNaming::derive(&reference, config.repo_prefix.as_deref());

    println!("Host:             {}", reference.host);
    println!("Script:           {}", reference.script_filename);
    println!("Base image:       {}", base_image);
    println!("Image name:       {}", naming.image_name);
    println!("Download URL:     {}", naming.download_url);
    println!("Destination file: {}", naming.destination_file);
    println!("Exec script path: {}", naming.exec_script_path);

    Ok(())
}
