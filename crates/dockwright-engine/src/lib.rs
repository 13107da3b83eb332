//! Container engine operations for dockwright.
//!
//! Everything goes through the engine's CLI (`docker` by default):
//!
//! ```text
//! EngineClient::build    ── <engine> build -t <tag> [flags] <context>   (streamed)
//! EngineClient::run      ── <engine> run [flags] <tag>                  (streamed)
//! EngineClient::inspect  ── <engine> inspect <tag>                      (captured, JSON)
//! ```

pub mod client;
pub mod engine;
pub mod executor;
pub mod image;
pub mod output;

pub use client::{BuildError, BuildOptions, EngineClient, InspectError, RunError, RunOptions};
pub use engine::EngineError;
pub use executor::{EngineCommand, EngineExecutor, RealExecutor};
pub use image::ImageDetails;
pub use output::Output;
