use dockwright_build::WriteError;
use dockwright_engine::{BuildError, InspectError, RunError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to serialize Dockerfile")]
    Write(#[from] WriteError),

    #[error("Dockerfile not found — call serialize() first")]
    Precondition,

    #[error("failed to build image")]
    Build(#[from] BuildError),

    #[error("failed to run image")]
    Run(#[from] RunError),

    #[error("failed to read image details")]
    Inspect(#[from] InspectError),
}
