//! Write a Dockerfile with a fluent builder, then build and run it.
//!
//! This is the facade crate over the dockwright sub-crates.
//!
//! | Module | Crate | Description |
//! |--------|-------|-------------|
//! | root | `dockwright-core` | `dockwright.toml` configuration |
//! | [`build`] | `dockwright-build` | instruction formatting and Dockerfile serialization |
//! | [`engine`] | `dockwright-engine` | container engine CLI (build, run, inspect) |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dockwright::{BuildOptions, Image, Instructions, RunOptions, SerializeOptions};
//!
//! # async fn example() -> Result<(), dockwright::Error> {
//! let mut image = Image::new("dockwright-whalesay")
//!     .from_tag("docker/whalesay", "latest")
//!     .run("apt-get -y update && apt-get install -y fortunes")
//!     .cmd("/usr/games/fortune -a | cowsay");
//!
//! let contents = image.serialize(&SerializeOptions::default())?;
//! println!("{contents}");
//!
//! let details = image.build_image(BuildOptions::default()).await?;
//! println!("built {}", details.id);
//!
//! image.run_image(RunOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;

pub use dockwright_build::{
    Dockerfile, DockerfileWriter, FsWriter, Instruction, Instructions, Pair, Ports,
    SerializeOptions, Signal, Value, WriteError,
};
pub use dockwright_core::{DockwrightConfig, Error as ConfigError};
pub use dockwright_engine::{
    BuildError, BuildOptions, EngineClient, ImageDetails, InspectError, Output, RunError,
    RunOptions,
};
pub use error::{Error, Result};
pub use image::{Image, generate_tag};

/// Instruction formatting and Dockerfile serialization.
pub mod build {
    pub use dockwright_build::*;
}

/// Container engine operations.
pub mod engine {
    pub use dockwright_engine::*;
}
