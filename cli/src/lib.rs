//! Jig CLI - Build container images from remote scripts.

pub mod commands;
