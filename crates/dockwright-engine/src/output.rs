use std::fmt;
use std::io::Write;

use crate::engine::EngineError;

/// Per-chunk callback for engine output.
pub type Sink = Box<dyn FnMut(&str) -> std::io::Result<()> + Send>;

/// Where streamed engine output goes.
///
/// By default stdout chunks go to the process's stdout and stderr chunks to
/// its stderr. Each chunk is one line without its terminator. A failed write
/// to a forwarding sink stops the stream with [`EngineError::Forward`].
pub struct Output {
    stdout: Sink,
    stderr: Sink,
}

impl Output {
    pub fn new(
        stdout: impl FnMut(&str) + Send + 'static,
        stderr: impl FnMut(&str) + Send + 'static,
    ) -> Self {
        Self {
            stdout: infallible(stdout),
            stderr: infallible(stderr),
        }
    }

    /// Write each chunk as a line to the given writers.
    pub fn to_writers(
        mut stdout: impl Write + Send + 'static,
        mut stderr: impl Write + Send + 'static,
    ) -> Self {
        Self {
            stdout: Box::new(move |chunk: &str| writeln!(stdout, "{chunk}")),
            stderr: Box::new(move |chunk: &str| writeln!(stderr, "{chunk}")),
        }
    }

    /// Replace the stdout callback.
    pub fn stdout(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.stdout = infallible(sink);
        self
    }

    /// Replace the stderr callback.
    pub fn stderr(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.stderr = infallible(sink);
        self
    }

    /// Drop all output.
    pub fn discard() -> Self {
        Self::new(|_| {}, |_| {})
    }

    pub fn emit_stdout(&mut self, chunk: &str) -> Result<(), EngineError> {
        (self.stdout)(chunk).map_err(|e| EngineError::Forward {
            stream: "stdout",
            source: e,
        })
    }

    pub fn emit_stderr(&mut self, chunk: &str) -> Result<(), EngineError> {
        (self.stderr)(chunk).map_err(|e| EngineError::Forward {
            stream: "stderr",
            source: e,
        })
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::to_writers(std::io::stdout(), std::io::stderr())
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

fn infallible(mut sink: impl FnMut(&str) + Send + 'static) -> Sink {
    Box::new(move |chunk: &str| {
        sink(chunk);
        Ok(())
    })
}
