use std::io::{BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};

use crate::core::command::InvocationSpec;
use crate::core::diagnostics::{classify_line, LineKind};
use crate::core::error::FfxError;

fn split_argv(argv: &[String]) -> Result<(&String, &[String]), FfxError> {
    argv.split_first().ok_or_else(|| FfxError::InvalidCommand {
        message: "empty argument vector".to_string(),
    })
}

/// Runs `argv[0]` with the remaining arguments and reports whether it exited with zero.
///
/// A non-zero exit is `Ok(false)`; only a failure to start the process is an error.
pub fn run(argv: &[String]) -> Result<bool, FfxError> {
    let (program, args) = split_argv(argv)?;

    let started = Instant::now();
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| FfxError::spawn(program, e))?;

    let output = child.wait_with_output().map_err(|e| FfxError::Execution {
        program: program.clone(),
        source: e,
    })?;

    debug!("{program} exited with {} after {:?}", output.status, started.elapsed());

    if output.status.success() {
        return Ok(true);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines() {
        if classify_line(line) == LineKind::Error {
            warn!("{program}: {}", line.trim());
        }
    }
    Ok(false)
}

/// Runs `argv` and returns stdout and stderr merged line by line, whatever the exit code.
pub fn capture(argv: &[String]) -> Result<String, FfxError> {
    let (program, args) = split_argv(argv)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| FfxError::spawn(program, e))?;

    let (line_tx, line_rx) = mpsc::channel::<String>();
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_line_reader(stdout, line_tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_line_reader(stderr, line_tx.clone()));
    }
    drop(line_tx);

    let mut buffer = String::new();
    for line in line_rx {
        buffer.push_str(&line);
        buffer.push('\n');
    }

    for reader in readers {
        let _ = reader.join();
    }

    let status = child.wait().map_err(|e| FfxError::Execution {
        program: program.clone(),
        source: e,
    })?;
    debug!(
        "captured {} bytes from {program} (status {status})",
        buffer.len()
    );

    Ok(buffer)
}

/// Logs the command line and runs it.
pub fn execute(spec: &InvocationSpec) -> Result<bool, FfxError> {
    info!("{spec}");
    run(&spec.argv())
}

fn spawn_line_reader<R: Read + Send + 'static>(
    reader: R,
    sender: Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut line_buf: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };

            for &byte in &chunk[..read] {
                match byte {
                    b'\r' | b'\n' => {
                        if !line_buf.is_empty() {
                            let line = String::from_utf8_lossy(&line_buf).to_string();
                            line_buf.clear();
                            let _ = sender.send(line);
                        }
                    }
                    other => line_buf.push(other),
                }
            }
        }

        if !line_buf.is_empty() {
            let _ = sender.send(String::from_utf8_lossy(&line_buf).to_string());
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn zero_exit_is_success() {
        assert!(run(&argv(&["true"])).unwrap());
    }

    #[test]
    fn nonzero_exit_is_false_not_error() {
        assert!(!run(&argv(&["false"])).unwrap());
        assert!(!run(&argv(&["sh", "-c", "echo 'Error opening input' >&2; exit 1"])).unwrap());
    }

    #[test]
    fn missing_binary_is_execution_error() {
        let err = run(&argv(&["ffcmd-definitely-missing-binary"])).unwrap_err();
        assert!(err.is_execution());
        assert!(matches!(err, FfxError::BinaryNotFound { .. }));

        let err = capture(&argv(&["ffcmd-definitely-missing-binary", "-i", "x"])).unwrap_err();
        assert!(err.is_execution());
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(run(&[]), Err(FfxError::InvalidCommand { .. })));
    }

    #[test]
    fn capture_merges_both_streams_regardless_of_exit() {
        let text = capture(&argv(&[
            "sh",
            "-c",
            "echo to-stdout; echo '  Duration: 00:00:01.00, bitrate: 8 kb/s' >&2; exit 1",
        ]))
        .unwrap();
        assert!(text.contains("to-stdout\n"));
        assert!(text.contains("Duration: 00:00:01.00, bitrate: 8 kb/s\n"));
    }

    #[test]
    fn capture_splits_carriage_returns() {
        let text = capture(&argv(&["sh", "-c", "printf 'a\\rb\\r\\nc'"])).unwrap();
        assert_eq!(text, "a\nb\nc\n");
    }

    #[test]
    fn execute_runs_spec_argv() {
        let spec = InvocationSpec::new("true").input("whatever.mp4", ["-y"]);
        assert!(execute(&spec).unwrap());
    }
}
