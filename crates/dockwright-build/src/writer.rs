use std::path::{Path, PathBuf};

/// Destination for rendered Dockerfile content.
///
/// Production code uses [`FsWriter`]; tests can record writes or inject failures.
pub trait DockerfileWriter {
    fn write(&self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Writes straight to the filesystem. The handle is closed before `write` returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl DockerfileWriter for FsWriter {
    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        std::fs::write(path, content)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write Dockerfile to {path}")]
pub struct WriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}
