//! `jig build` command — Build a container image from a script URI.
//!
//! Resolves the base image, fetches and stages the script, and delegates
//! the image build to the local docker CLI.

use std::path::PathBuf;

use clap::Args;

use jig_builder::ImageBuilder;
use jig_core::BuilderConfig;

#[derive(Args)]
pub struct BuildArgs {
    /// Script URI (e.g., "https://raw.githubusercontent.com/owner/repo/main/hello.java")
    pub uri: String,

    /// Container repository prefix prepended to image names
    /// (overrides JIG_CONTAINER_REPO)
    #[arg(long = "repo-prefix")]
    pub repo_prefix: Option<String>,

    /// Directory where fetched scripts are staged (default: system temp dir)
    #[arg(long = "staging-dir")]
    pub staging_dir: Option<PathBuf>,

    /// Only print the image name
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn execute(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BuilderConfig::from_env();
    if let Some(prefix) = args.repo_prefix {
        config = config.with_repo_prefix(prefix);
    }
    if let Some(dir) = args.staging_dir {
        config = config.with_staging_dir(dir);
    }

    let builder = ImageBuilder::from_config(config);

    match builder.build(&args.uri).await? {
        Some(image_name) => {
            if args.quiet {
                println!("{image_name}");
            } else {
                println!("Built image {image_name}");
            }
        }
        None => {
            if !args.quiet {
                println!("No image produced");
            }
        }
    }

    Ok(())
}
