//! External process execution with merged output capture.
//!
//! Runs one external process per call, never through a shell. Stdout and
//! stderr are drained line-by-line by two concurrent reader threads feeding a
//! single mutex-guarded buffer, so interleaving between the two streams
//! depends on scheduling while ordering within each stream is preserved. The
//! call blocks until the process exits; there is no timeout and no retry.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::ProcessError;

/// Run an external program to completion, capturing combined output.
///
/// On exit code 0 returns the combined log. On a non-zero exit code returns
/// [`ProcessError::BuildFailed`] carrying the exit code and the full log; a
/// child killed by a signal reports exit code -1.
pub fn run_process(program: &str, args: &[String]) -> Result<String, ProcessError> {
    tracing::debug!(program, ?args, "Starting external process");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::Spawn {
            program: program.to_string(),
            source: e,
        })?;

    let log = Arc::new(Mutex::new(String::new()));

    let mut readers = Vec::with_capacity(2);
    if let Some(stream) = child.stdout.take() {
        readers.push(capture_lines(stream, Arc::clone(&log)));
    }
    if let Some(stream) = child.stderr.take() {
        readers.push(capture_lines(stream, Arc::clone(&log)));
    }

    // Both pipes reach EOF once the child exits, so joining the readers
    // first cannot deadlock and guarantees the log is complete before the
    // exit code is inspected.
    for reader in readers {
        let _ = reader.join();
    }

    let status = child.wait().map_err(|e| ProcessError::Wait {
        program: program.to_string(),
        source: e,
    })?;

    let combined = match log.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };

    if status.success() {
        tracing::debug!(program, "External process exited successfully");
        Ok(combined)
    } else {
        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(program, exit_code, "External process failed");
        Err(ProcessError::BuildFailed {
            exit_code,
            log: combined,
        })
    }
}

/// Drain one output stream line-by-line into the shared log.
///
/// The lock is held only for the duration of a single append. Unreadable
/// lines produce no line event and are skipped.
fn capture_lines<R>(stream: R, log: Arc<Mutex<String>>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            let Ok(line) = line else { continue };
            if let Ok(mut log) = log.lock() {
                log.push_str(&line);
                log.push('\n');
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Result<String, ProcessError> {
        run_process("sh", &["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_success_returns_combined_log() {
        let log = sh("echo out-line; echo err-line >&2").unwrap();
        assert!(log.contains("out-line\n"));
        assert!(log.contains("err-line\n"));
    }

    #[test]
    fn test_failure_carries_exit_code_and_log() {
        let err = sh("echo line1; echo line2 >&2; exit 2").unwrap_err();
        match &err {
            ProcessError::BuildFailed { exit_code, log } => {
                assert_eq!(*exit_code, 2);
                assert!(log.contains("line1"));
                assert!(log.contains("line2"));
            }
            other => panic!("Unexpected error: {other}"),
        }

        // The rendered message is the diagnostic surface: exit code first,
        // then the full captured log.
        let message = err.to_string();
        assert!(message.contains("2"));
        assert!(message.contains("line1"));
        assert!(message.contains("line2"));
    }

    #[test]
    fn test_single_stream_ordering_preserved() {
        let log = sh("echo first; echo second; echo third").unwrap();
        let first = log.find("first").unwrap();
        let second = log.find("second").unwrap();
        let third = log.find("third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_spawn_failure_for_missing_program() {
        let err = run_process("weavebench-no-such-tool", &[]).unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[test]
    fn test_exit_zero_with_no_output() {
        let log = sh("true").unwrap();
        assert!(log.is_empty());
    }
}
