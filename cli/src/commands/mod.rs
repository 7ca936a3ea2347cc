//! CLI command definitions and dispatch.

mod build;
mod resolve;
mod version;

use clap::{Parser, Subcommand};

/// Jig — turn remote scripts into container images.
#[derive(Parser)]
#[command(name = "jig", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Build a container image from a script URI
    Build(build::BuildArgs),
    /// Show how a script URI would be named and resolved, without building
    Resolve(resolve::ResolveArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build(args) => build::execute(args).await,
        Command::Resolve(args) => resolve::execute(args).await,
        Command::Version(args) => version::execute(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_command() {
        let cli = Cli::try_parse_from([
            "jig",
            "build",
            "https://raw.example.com/acme/tools/hello.java",
            "--repo-prefix",
            "registry.local/jo",
        ])
        .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.uri, "https://raw.example.com/acme/tools/hello.java");
                assert_eq!(args.repo_prefix.as_deref(), Some("registry.local/jo"));
                assert!(!args.quiet);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_resolve_command() {
        let cli = Cli::try_parse_from([
            "jig",
            "resolve",
            "https://raw.example.com/acme/tools/hello",
        ])
        .unwrap();

        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.uri, "https://raw.example.com/acme/tools/hello");
                assert_eq!(args.repo_prefix, None);
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn test_build_requires_uri() {
        assert!(Cli::try_parse_from(["jig", "build"]).is_err());
    }
}
