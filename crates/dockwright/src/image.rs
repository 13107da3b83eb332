use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dockwright_build::{
    Dockerfile, DockerfileWriter, FsWriter, Instruction, Instructions, SerializeOptions,
};
use dockwright_core::DockwrightConfig;
use dockwright_engine::{
    BuildOptions, EngineClient, EngineExecutor, ImageDetails, RealExecutor, RunOptions,
};

use crate::error::{Error, Result};

static TAG_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Tag used when none is supplied: `dockwright-<unix millis>-<sequence>`.
pub fn generate_tag() -> String {
    let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis(),
        Err(e) => e.duration().as_millis(),
    };
    let sequence = TAG_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("dockwright-{millis}-{sequence}")
}

/// One image definition: its tag, its Dockerfile, and the engine that builds it.
///
/// ```text
/// authoring ── serialize() ──> serialized ── build_image() ──> built ── run_image() ──> running
/// ```
///
/// `build_image` refuses to run before `serialize`; `run_image` only needs the tag.
pub struct Image<E: EngineExecutor = RealExecutor, W: DockerfileWriter = FsWriter> {
    tag: String,
    dockerfile: Dockerfile,
    /// Path of the last successful serialize.
    written_to: Option<PathBuf>,
    client: EngineClient<E>,
    writer: W,
}

impl Image<RealExecutor, FsWriter> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            dockerfile: Dockerfile::new(),
            written_to: None,
            client: EngineClient::new(),
            writer: FsWriter,
        }
    }

    /// Uses the engine binary configured in `dockwright.toml`.
    pub fn from_config(tag: impl Into<String>, config: &DockwrightConfig) -> Self {
        Self::new(tag).with_client(EngineClient::from_config(&config.engine))
    }
}

impl Default for Image<RealExecutor, FsWriter> {
    fn default() -> Self {
        Self::new(generate_tag())
    }
}

impl<E: EngineExecutor, W: DockerfileWriter> Image<E, W> {
    pub fn with_client<F: EngineExecutor>(self, client: EngineClient<F>) -> Image<F, W> {
        Image {
            tag: self.tag,
            dockerfile: self.dockerfile,
            written_to: self.written_to,
            client,
            writer: self.writer,
        }
    }

    pub fn with_writer<V: DockerfileWriter>(self, writer: V) -> Image<E, V> {
        Image {
            tag: self.tag,
            dockerfile: self.dockerfile,
            written_to: self.written_to,
            client: self.client,
            writer,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn dockerfile(&self) -> &Dockerfile {
        &self.dockerfile
    }

    pub fn client(&self) -> &EngineClient<E> {
        &self.client
    }

    /// Content written by the most recent [`serialize`](Self::serialize).
    pub fn rendered(&self) -> Option<&str> {
        self.dockerfile.rendered()
    }

    /// Render the instructions and write them to `options.output_file`.
    ///
    /// Blocking: the file is written synchronously on the calling thread.
    pub fn serialize(&mut self, options: &SerializeOptions) -> Result<String> {
        let content = self.dockerfile.serialize(&self.writer, options)?;
        self.written_to = Some(options.output_file.clone());
        tracing::debug!(tag = %self.tag, path = %options.output_file.display(), "Dockerfile written");
        Ok(content)
    }

    /// Build the image from the serialized Dockerfile and return its inspect details.
    ///
    /// When the Dockerfile was written somewhere other than `<context>/Dockerfile`
    /// and `options` carries no `-f`/`--file`, the written path is passed as `-f`.
    pub async fn build_image(&self, mut options: BuildOptions) -> Result<ImageDetails> {
        if self.dockerfile.rendered().is_none() {
            return Err(Error::Precondition);
        }

        if let Some(path) = &self.written_to {
            point_build_at(&mut options, path);
        }
        self.client.build(&self.tag, options).await?;
        self.inspect().await
    }

    /// Run the image tagged with [`tag`](Self::tag).
    pub async fn run_image(&self, options: RunOptions) -> Result<()> {
        self.client.run(&self.tag, options).await?;
        Ok(())
    }

    pub async fn inspect(&self) -> Result<ImageDetails> {
        Ok(self.client.inspect(&self.tag).await?)
    }
}

fn point_build_at(options: &mut BuildOptions, dockerfile: &Path) {
    let has_file_flag = options
        .args
        .iter()
        .any(|(flag, _)| flag == "-f" || flag == "--file");
    if has_file_flag {
        return;
    }

    let context = match &options.dir {
        Some(dir) => dir.clone(),
        None => PathBuf::from("."),
    };
    if same_path(dockerfile, &context.join("Dockerfile")) {
        return;
    }

    tracing::debug!(path = %dockerfile.display(), "building from non-default Dockerfile");
    options
        .args
        .push(("-f".to_owned(), dockerfile.to_string_lossy().into_owned()));
}

/// Lexical comparison that ignores `.` components.
fn same_path(a: &Path, b: &Path) -> bool {
    significant(a) == significant(b)
}

fn significant(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl<E: EngineExecutor, W: DockerfileWriter> Instructions for Image<E, W> {
    fn instruction(mut self, instruction: Instruction) -> Self {
        self.dockerfile.push(&instruction);
        self
    }
}
