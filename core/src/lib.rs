//! Jig Core - Foundational Types
//!
//! This module provides the error taxonomy and configuration types
//! used across the jig workspace.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::BuilderConfig;
pub use error::{JigError, Result};

/// Jig version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
