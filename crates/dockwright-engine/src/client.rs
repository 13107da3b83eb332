use std::path::PathBuf;

use dockwright_core::{BuildConfig, EngineConfig, RunConfig};

use crate::engine::EngineError;
use crate::executor::{EngineCommand, EngineExecutor, RealExecutor};
use crate::image::ImageDetails;
use crate::output::Output;

/// Container engine client, parameterized over the executor for testability.
pub struct EngineClient<E: EngineExecutor = RealExecutor> {
    executor: E,
}

impl EngineClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            executor: RealExecutor::from_config(config),
        }
    }
}

impl Default for EngineClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EngineExecutor> EngineClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    // ── Build ──

    /// `<engine> build -t <tag> [flags] <context>`, streaming output.
    pub async fn build(&self, tag: &str, options: BuildOptions) -> Result<(), BuildError> {
        let BuildOptions {
            mut output,
            dir,
            args: flags,
        } = options;

        let mut argv = args(["build", "-t", tag]);
        push_flags(&mut argv, &flags);
        let context = match dir {
            Some(dir) => dir,
            None => PathBuf::from("."),
        };
        argv.push(context.to_string_lossy().into_owned());

        let code = self
            .executor
            .exec_streaming(&EngineCommand::new(argv), &mut output)
            .await
            .map_err(|e| {
                if e.is_mid_stream() {
                    BuildError::Stream { source: e }
                } else {
                    BuildError::Spawn { source: e }
                }
            })?;

        match code {
            Some(0) => {
                tracing::info!(tag, "image built");
                Ok(())
            }
            code => Err(BuildError::Exited { code }),
        }
    }

    // ── Run ──

    /// `<engine> run [flags] <tag>`, streaming output.
    pub async fn run(&self, tag: &str, options: RunOptions) -> Result<(), RunError> {
        let RunOptions {
            mut output,
            args: flags,
        } = options;

        let mut argv = args(["run"]);
        push_flags(&mut argv, &flags);
        argv.push(tag.to_owned());

        let code = self
            .executor
            .exec_streaming(&EngineCommand::new(argv), &mut output)
            .await
            .map_err(|e| {
                if e.is_mid_stream() {
                    RunError::Stream { source: e }
                } else {
                    RunError::Spawn { source: e }
                }
            })?;

        match code {
            Some(0) => {
                tracing::info!(tag, "container exited cleanly");
                Ok(())
            }
            code => Err(RunError::Exited { code }),
        }
    }

    // ── Inspect ──

    /// `<engine> inspect <tag>`, returning the first reported image.
    pub async fn inspect(&self, tag: &str) -> Result<ImageDetails, InspectError> {
        let raw = self
            .executor
            .exec(&EngineCommand::new(args(["inspect", tag])))
            .await
            .map_err(|e| InspectError::Command { source: e })?;

        ImageDetails::from_inspect_output(&raw)
            .map_err(|e| InspectError::Parse {
                tag: tag.to_owned(),
                source: e,
            })?
            .ok_or_else(|| InspectError::Empty {
                tag: tag.to_owned(),
            })
    }
}

// ── Options ──

/// Options for [`EngineClient::build`].
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub output: Output,
    /// Build context; the current directory when `None`.
    pub dir: Option<PathBuf>,
    /// Extra flags in order. An empty value emits the flag alone.
    pub args: Vec<(String, String)>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            output: Output::default(),
            dir: Some(config.context.clone()),
            args: config
                .args
                .iter()
                .map(|(flag, value)| (flag.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn stdout(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.output = self.output.stdout(sink);
        self
    }

    pub fn stderr(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.output = self.output.stderr(sink);
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn arg(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((flag.into(), value.into()));
        self
    }
}

/// Options for [`EngineClient::run`].
#[derive(Debug, Default)]
pub struct RunOptions {
    pub output: Output,
    /// Extra flags in order, placed before the tag. An empty value emits the flag alone.
    pub args: Vec<(String, String)>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            output: Output::default(),
            args: config
                .args
                .iter()
                .map(|(flag, value)| (flag.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn stdout(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.output = self.output.stdout(sink);
        self
    }

    pub fn stderr(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.output = self.output.stderr(sink);
        self
    }

    pub fn arg(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((flag.into(), value.into()));
        self
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn push_flags(argv: &mut Vec<String>, flags: &[(String, String)]) {
    for (flag, value) in flags {
        argv.push(flag.clone());
        if !value.is_empty() {
            argv.push(value.clone());
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_owned(),
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to start image build")]
    Spawn { source: EngineError },

    #[error("image build output was interrupted")]
    Stream { source: EngineError },

    #[error("image build exited with {}", describe_code(*code))]
    Exited { code: Option<i32> },
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to start container")]
    Spawn { source: EngineError },

    #[error("container output was interrupted")]
    Stream { source: EngineError },

    #[error("container exited with {}", describe_code(*code))]
    Exited { code: Option<i32> },
}

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("failed to inspect image")]
    Command { source: EngineError },

    #[error("unexpected inspect output for image {tag}")]
    Parse {
        tag: String,
        source: serde_json::Error,
    },

    #[error("inspect reported no image for {tag}")]
    Empty { tag: String },
}
