//! Base image resolution.
//!
//! Maps a parsed script reference to the base runtime image the build
//! starts from. Strategies are evaluated in priority order, first match
//! wins; no match is a hard failure upstream, raised before any network
//! fetch is attempted.

use crate::naming::SOURCE_EXTENSION;
use crate::reference::ScriptReference;

/// Base image used for jbang scripts.
const DEFAULT_JBANG_IMAGE: &str = "jbangdev/jbang-action";

/// A single base-image resolution rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// jbang script convention: a `.java` source or an extension-less
    /// path, served from any host.
    JbangScript { image: String },
    /// Pin every script from a given host to one base image.
    HostPinned { host: String, image: String },
}

impl ResolutionStrategy {
    /// Whether this strategy applies to the given reference.
    fn matches(&self, reference: &ScriptReference) -> bool {
        match self {
            ResolutionStrategy::JbangScript { .. } => {
                let name = &reference.script_filename;
                name.ends_with(SOURCE_EXTENSION) || !name.contains('.')
            }
            ResolutionStrategy::HostPinned { host, .. } => reference.host == *host,
        }
    }

    /// The base image this strategy resolves to.
    fn image(&self) -> &str {
        match self {
            ResolutionStrategy::JbangScript { image } => image,
            ResolutionStrategy::HostPinned { image, .. } => image,
        }
    }
}

/// Resolves script references to base images through an ordered strategy
/// list.
#[derive(Debug, Clone)]
pub struct BaseImageResolver {
    strategies: Vec<ResolutionStrategy>,
}

impl Default for BaseImageResolver {
    fn default() -> Self {
        Self {
            strategies: vec![ResolutionStrategy::JbangScript {
                image: DEFAULT_JBANG_IMAGE.to_string(),
            }],
        }
    }
}

impl BaseImageResolver {
    /// Create a resolver with an explicit strategy list.
    pub fn new(strategies: Vec<ResolutionStrategy>) -> Self {
        Self { strategies }
    }

    /// Append a strategy. Earlier strategies take priority.
    pub fn with_strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Return the first matching base image, or `None` when no strategy
    /// applies.
    pub fn resolve(&self, reference: &ScriptReference) -> Option<&str> {
        self.strategies
            .iter()
            .find(|s| s.matches(reference))
            .map(|s| s.image())
    }
}
