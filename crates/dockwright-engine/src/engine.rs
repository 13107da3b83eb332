#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("container engine `{binary}` could not be started — install it or set [engine].binary")]
    NotFound {
        binary: String,
        source: std::io::Error,
    },

    #[error("container engine command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("container engine output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("failed to read container engine output")]
    Stream { source: std::io::Error },

    #[error("failed to forward container engine {stream}")]
    Forward {
        stream: &'static str,
        source: std::io::Error,
    },

    #[error("container engine {0} pipe was not captured")]
    MissingPipe(&'static str),
}

impl EngineError {
    /// True when the engine started but its output could not be carried through.
    pub fn is_mid_stream(&self) -> bool {
        matches!(self, Self::Stream { .. } | Self::Forward { .. })
    }
}
