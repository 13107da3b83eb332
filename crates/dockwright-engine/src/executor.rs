use std::borrow::Cow;
use std::path::PathBuf;
use std::process::Stdio;

use dockwright_core::EngineConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::engine::EngineError;
use crate::output::Output;

/// Arguments passed to the engine binary, plus an optional working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineCommand {
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl EngineCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Abstraction over container engine execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait EngineExecutor: Send + Sync {
    /// Run an engine command and capture its stdout.
    async fn exec(&self, command: &EngineCommand) -> Result<String, EngineError>;

    /// Run an engine command, feeding each output line to `output` as it arrives.
    ///
    /// Returns the exit code, `None` when the process was killed by a signal.
    async fn exec_streaming(
        &self,
        command: &EngineCommand,
        output: &mut Output,
    ) -> Result<Option<i32>, EngineError>;
}

/// Spawns the real engine binary.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    binary: String,
}

impl RealExecutor {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_binary(config.binary.clone())
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, command: &EngineCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn not_found(&self, source: std::io::Error) -> EngineError {
        EngineError::NotFound {
            binary: self.binary.clone(),
            source,
        }
    }
}

impl Default for RealExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineExecutor for RealExecutor {
    async fn exec(&self, command: &EngineCommand) -> Result<String, EngineError> {
        tracing::debug!(binary = %self.binary, args = ?command.args, "exec");

        let output = self
            .command(command)
            .output()
            .await
            .map_err(|e| self.not_found(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| EngineError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(EngineError::CommandFailed {
                args: command.args.clone(),
                stderr,
            })
        }
    }

    async fn exec_streaming(
        &self,
        command: &EngineCommand,
        output: &mut Output,
    ) -> Result<Option<i32>, EngineError> {
        tracing::debug!(binary = %self.binary, args = ?command.args, cwd = ?command.cwd, "exec streaming");

        let mut child = self
            .command(command)
            .spawn()
            .map_err(|e| self.not_found(e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or(EngineError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(EngineError::MissingPipe("stderr"))?;

        let mut stdout = BufReader::new(stdout);
        let mut stderr = BufReader::new(stderr);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;

        // read_until keeps partial lines in the buffer when the other branch wins.
        while stdout_open || stderr_open {
            tokio::select! {
                read = stdout.read_until(b'\n', &mut stdout_buf), if stdout_open => {
                    if read.map_err(|e| EngineError::Stream { source: e })? == 0 {
                        stdout_open = false;
                    } else {
                        output.emit_stdout(&decode_line(&stdout_buf))?;
                        stdout_buf.clear();
                    }
                }
                read = stderr.read_until(b'\n', &mut stderr_buf), if stderr_open => {
                    if read.map_err(|e| EngineError::Stream { source: e })? == 0 {
                        stderr_open = false;
                    } else {
                        output.emit_stderr(&decode_line(&stderr_buf))?;
                        stderr_buf.clear();
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| EngineError::Stream { source: e })?;
        tracing::debug!(binary = %self.binary, %status, "engine exited");
        Ok(status.code())
    }
}

/// One output line without its `\n` or `\r\n`, invalid UTF-8 replaced.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}
