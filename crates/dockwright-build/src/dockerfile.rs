use std::path::PathBuf;

use dockwright_core::DockerfileConfig;

use crate::instruction::{Instruction, Pair, Ports, Signal, Value};
use crate::writer::{DockerfileWriter, WriteError};

/// Chainable Dockerfile authoring.
///
/// Implementors only provide [`Instructions::instruction`]; every keyword
/// method formats its arguments into an [`Instruction`] and hands it over.
pub trait Instructions: Sized {
    /// Append one instruction.
    fn instruction(self, instruction: Instruction) -> Self;

    /// `FROM image`
    fn from(self, image: impl Into<String>) -> Self {
        self.instruction(Instruction::From {
            image: image.into(),
            tag: None,
        })
    }

    /// `FROM image:tag`, or `FROM image` when `tag` is empty.
    fn from_tag(self, image: impl Into<String>, tag: impl Into<String>) -> Self {
        self.instruction(Instruction::From {
            image: image.into(),
            tag: Some(tag.into()),
        })
    }

    fn maintainer(self, maintainer: impl Into<String>) -> Self {
        self.instruction(Instruction::Maintainer(maintainer.into()))
    }

    fn run(self, commands: impl Into<Value>) -> Self {
        self.instruction(Instruction::Run(commands.into()))
    }

    fn cmd(self, commands: impl Into<Value>) -> Self {
        self.instruction(Instruction::Cmd(commands.into()))
    }

    fn label(self, labels: impl Into<Pair>) -> Self {
        self.instruction(Instruction::Label(labels.into()))
    }

    fn expose(self, ports: impl Into<Ports>) -> Self {
        self.instruction(Instruction::Expose(ports.into()))
    }

    fn env(self, vars: impl Into<Pair>) -> Self {
        self.instruction(Instruction::Env(vars.into()))
    }

    /// With a sequence of sources the destination becomes the last array element.
    fn add(self, sources: impl Into<Value>, destination: impl Into<String>) -> Self {
        self.instruction(Instruction::Add {
            sources: sources.into(),
            destination: destination.into(),
        })
    }

    fn copy(self, sources: impl Into<Value>, destination: impl Into<String>) -> Self {
        self.instruction(Instruction::Copy {
            sources: sources.into(),
            destination: destination.into(),
        })
    }

    fn entrypoint(self, commands: impl Into<Value>) -> Self {
        self.instruction(Instruction::Entrypoint(commands.into()))
    }

    fn volume(self, volumes: impl Into<Value>) -> Self {
        self.instruction(Instruction::Volume(volumes.into()))
    }

    fn user(self, user: impl Into<String>) -> Self {
        self.instruction(Instruction::User(user.into()))
    }

    fn workdir(self, dir: impl Into<String>) -> Self {
        self.instruction(Instruction::Workdir(dir.into()))
    }

    /// `ARG name`
    fn arg(self, name: impl Into<String>) -> Self {
        self.instruction(Instruction::Arg {
            name: name.into(),
            default: None,
        })
    }

    /// `ARG name=default`
    fn arg_default(self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.instruction(Instruction::Arg {
            name: name.into(),
            default: Some(default.into()),
        })
    }

    fn onbuild(self, command: impl Into<String>) -> Self {
        self.instruction(Instruction::Onbuild(command.into()))
    }

    fn stopsignal(self, signal: impl Into<Signal>) -> Self {
        self.instruction(Instruction::StopSignal(signal.into()))
    }
}

/// Where [`Dockerfile::serialize`] writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    pub output_file: PathBuf,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self::from_config(&DockerfileConfig::default())
    }
}

impl SerializeOptions {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    pub fn from_config(config: &DockerfileConfig) -> Self {
        Self {
            output_file: config.output_file.clone(),
        }
    }
}

/// Ordered, append-only list of formatted instruction lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    instructions: Vec<String>,
    rendered: Option<String>,
}

impl Dockerfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format `instruction` and append it.
    pub fn push(&mut self, instruction: &Instruction) {
        let line = instruction.to_string();
        tracing::debug!(keyword = instruction.keyword(), %line, "appending instruction");
        self.instructions.push(line);
    }

    /// Formatted lines in append order.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Content from the most recent [`render`](Self::render), if any.
    ///
    /// Not refreshed when instructions are appended afterwards.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Join the instructions with `\n` (no trailing newline) and remember the result.
    pub fn render(&mut self) -> &str {
        self.rendered.insert(self.instructions.join("\n")).as_str()
    }

    /// Render and hand the content to `writer`.
    ///
    /// The rendered content is kept even if the write fails.
    /// The write is synchronous; call it outside latency-sensitive async tasks.
    pub fn serialize<W: DockerfileWriter + ?Sized>(
        &mut self,
        writer: &W,
        options: &SerializeOptions,
    ) -> Result<String, WriteError> {
        let content = self.render().to_owned();
        let path = &options.output_file;
        tracing::debug!(path = %path.display(), bytes = content.len(), "writing Dockerfile");

        writer.write(path, &content).map_err(|e| WriteError {
            path: path.clone(),
            source: e,
        })?;

        Ok(content)
    }
}

impl Instructions for Dockerfile {
    fn instruction(mut self, instruction: Instruction) -> Self {
        self.push(&instruction);
        self
    }
}
