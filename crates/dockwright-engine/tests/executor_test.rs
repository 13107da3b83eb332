//! Exercises `RealExecutor` against `sh`, standing in for a container engine.
#![cfg(unix)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use dockwright_core::EngineConfig;
use dockwright_engine::engine::EngineError;
use dockwright_engine::executor::{EngineCommand, EngineExecutor, RealExecutor};
use dockwright_engine::output::Output;
use tempfile::TempDir;

fn shell() -> RealExecutor {
    RealExecutor::with_binary("sh")
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn default_binary_is_docker() {
    assert_eq!(RealExecutor::new().binary(), "docker");
    let config = EngineConfig {
        binary: "podman".to_owned(),
    };
    assert_eq!(RealExecutor::from_config(&config).binary(), "podman");
}

#[tokio::test]
async fn exec_captures_stdout() {
    let out = shell()
        .exec(&EngineCommand::new(["-c", "printf '[{\"Id\":\"x\"}]'"]))
        .await
        .unwrap();

    assert_eq!(out, r#"[{"Id":"x"}]"#);
}

#[tokio::test]
async fn exec_failure_carries_stderr() {
    let err = shell()
        .exec(&EngineCommand::new(["-c", "echo 'No such image' >&2; exit 1"]))
        .await
        .unwrap_err();

    match err {
        EngineError::CommandFailed { args, stderr } => {
            assert_eq!(args[0], "-c");
            assert!(stderr.contains("No such image"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_binary_is_reported() {
    let executor = RealExecutor::with_binary("dockwright-no-such-engine");
    let err = executor
        .exec(&EngineCommand::new(["version"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::NotFound { ref binary, .. } if binary == "dockwright-no-such-engine"
    ));
}

#[tokio::test]
async fn streaming_splits_streams_and_returns_exit_code() {
    let stdout = Arc::new(Mutex::new(Vec::new()));
    let stderr = Arc::new(Mutex::new(Vec::new()));
    let out_sink = Arc::clone(&stdout);
    let err_sink = Arc::clone(&stderr);
    let mut output = Output::new(
        move |chunk| out_sink.lock().unwrap().push(chunk.to_owned()),
        move |chunk| err_sink.lock().unwrap().push(chunk.to_owned()),
    );

    let code = shell()
        .exec_streaming(
            &EngineCommand::new(["-c", "echo one; echo oops >&2; echo two; exit 3"]),
            &mut output,
        )
        .await
        .unwrap();

    assert_eq!(code, Some(3));
    assert_eq!(*stdout.lock().unwrap(), vec!["one", "two"]);
    assert_eq!(*stderr.lock().unwrap(), vec!["oops"]);
}

#[tokio::test]
async fn streaming_runs_in_working_directory() {
    let tmp = TempDir::new().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut output =
        Output::discard().stdout(move |chunk| sink.lock().unwrap().push(chunk.to_owned()));

    let code = shell()
        .exec_streaming(
            &EngineCommand::new(["-c", "pwd"]).current_dir(tmp.path()),
            &mut output,
        )
        .await
        .unwrap();

    assert_eq!(code, Some(0));
    let pwd = std::path::PathBuf::from(&seen.lock().unwrap()[0]);
    assert_eq!(
        pwd.canonicalize().unwrap(),
        tmp.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn streaming_survives_invalid_utf8() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut output =
        Output::discard().stdout(move |chunk| sink.lock().unwrap().push(chunk.to_owned()));

    let code = shell()
        .exec_streaming(
            &EngineCommand::new(["-c", "echo before; printf '\\377\\n'; echo after; exit 0"]),
            &mut output,
        )
        .await
        .unwrap();

    assert_eq!(code, Some(0));
    assert_eq!(*seen.lock().unwrap(), vec!["before", "\u{FFFD}", "after"]);
}

#[tokio::test]
async fn streaming_strips_crlf_and_keeps_unterminated_last_line() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut output =
        Output::discard().stdout(move |chunk| sink.lock().unwrap().push(chunk.to_owned()));

    shell()
        .exec_streaming(
            &EngineCommand::new(["-c", "printf 'one\\r\\ntwo'"]),
            &mut output,
        )
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["one", "two"]);
}

#[tokio::test]
async fn writer_sinks_receive_each_line() {
    let stdout = SharedBuf::default();
    let stderr = SharedBuf::default();
    let mut output = Output::to_writers(stdout.clone(), stderr.clone());

    let code = shell()
        .exec_streaming(
            &EngineCommand::new(["-c", "echo Step 1/2; echo warn >&2; echo Step 2/2"]),
            &mut output,
        )
        .await
        .unwrap();

    assert_eq!(code, Some(0));
    assert_eq!(stdout.contents(), "Step 1/2\nStep 2/2\n");
    assert_eq!(stderr.contents(), "warn\n");
}

#[tokio::test]
async fn closed_writer_is_a_forward_error() {
    let mut output = Output::to_writers(ClosedPipe, SharedBuf::default());

    let err = shell()
        .exec_streaming(&EngineCommand::new(["-c", "echo hello"]), &mut output)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Forward { stream: "stdout", .. }));
    assert!(err.is_mid_stream());
}
