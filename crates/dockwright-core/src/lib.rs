//! Core types and configuration for dockwright.
//!
//! This crate defines the `dockwright.toml` schema ([`DockwrightConfig`])
//! and the shared error types.

pub mod config;
pub mod error;

pub use config::{
    BuildConfig, CONFIG_FILE_NAME, DockerfileConfig, DockwrightConfig, EngineConfig, RunConfig,
};
pub use error::{Error, Result};
