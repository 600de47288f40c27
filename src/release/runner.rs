use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use tracing::debug;

use crate::config::Secret;
use crate::error::{PublishError, Result};
use crate::release::command::ToolCommand;

/// Runs toolchain commands on behalf of the release sequence
///
/// Implementations return the captured stdout of a successful command. A
/// command that cannot be started or exits non-zero is an error; callers do not
/// retry.
pub trait CommandRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<String>;
}

/// Runs commands as child processes of this one
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl CommandRunner for SystemRunner {
    /// Execute the command and wait for it
    ///
    /// A stdin payload is written from a scoped thread while the child's
    /// output is drained, then stdin is closed. Without a payload the child
    /// inherits this process's stdin.
    ///
    /// # Returns
    /// * `Ok(String)` - stdout of the command
    /// * `Err(Spawn)` - if the program could not be started
    /// * `Err(CommandFailed)` - on non-zero exit, carrying the child's stderr
    fn run(&mut self, command: &ToolCommand) -> Result<String> {
        let command_line = command.to_string();
        debug!(step = command.step.name(), command = %command_line, "running command");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });

        let mut child = cmd.spawn().map_err(|source| PublishError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let payload = command.stdin.as_ref().map(Secret::expose);
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || write_payload(stdin, payload));
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
            });
            (output, written)
        });

        let output = output.map_err(|source| PublishError::Spawn {
            command: command_line.clone(),
            source,
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            debug!(command = %command_line, code, "command failed");
            return Err(PublishError::CommandFailed {
                command: command_line,
                code,
                stderr: stderr.trim_end().to_string(),
            });
        }
        written?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in stdout.lines().chain(stderr.lines()) {
            debug!(step = command.step.name(), "{}", line);
        }
        Ok(stdout)
    }
}

/// Write the payload and close stdin
///
/// A child that exits without reading its stdin closes the pipe; its exit
/// status then tells the story, so a broken pipe is not an error here.
fn write_payload(stdin: Option<ChildStdin>, payload: Option<&str>) -> io::Result<()> {
    let (Some(mut stdin), Some(payload)) = (stdin, payload) else {
        return Ok(());
    };
    match stdin.write_all(payload.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::command::Step;
    use std::sync::{Arc, Mutex};

    fn command(program: &str, args: &[&str]) -> ToolCommand {
        ToolCommand {
            step: Step::Inspect,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            stdin: None,
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemRunner::new()
            .run(&command("/nonexistent/path/to/docker", &["logout"]))
            .unwrap_err();
        assert!(matches!(err, PublishError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/path/to/docker logout"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let stdout = SystemRunner::new()
            .run(&command("sh", &["-c", "echo my/repository@sha256:abc"]))
            .unwrap();
        assert_eq!(stdout.trim(), "my/repository@sha256:abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_surfaces_stderr() {
        let err = SystemRunner::new()
            .run(&command("sh", &["-c", "echo 'denied: access' >&2; exit 3"]))
            .unwrap_err();
        match err {
            PublishError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "denied: access");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_payload_is_delivered() {
        let mut cmd = command("sh", &["-c", "cat"]);
        cmd.stdin = Some(Secret::new("s3cret"));
        let stdout = SystemRunner::new().run(&cmd).unwrap();
        assert_eq!(stdout, "s3cret");
    }

    #[cfg(unix)]
    #[test]
    fn test_rejection_before_reading_stdin_keeps_exit_status() {
        let mut cmd = command("sh", &["-c", "echo 'Error: unauthorized' >&2; exit 3"]);
        cmd.stdin = Some(Secret::new("x".repeat(1 << 20)));

        match SystemRunner::new().run(&cmd).unwrap_err() {
            PublishError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "Error: unauthorized");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_before_reading_stdin_does_not_block() {
        let mut cmd = command("sh", &["-c", "yes | head -c 262144; cat"]);
        cmd.stdin = Some(Secret::new("s3cret"));

        let stdout = SystemRunner::new().run(&cmd).unwrap();
        assert_eq!(stdout.len(), 262144 + "s3cret".len());
        assert!(stdout.ends_with("s3cret"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_stderr_is_logged_at_debug() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            SystemRunner::new()
                .run(&command("sh", &["-c", "echo '#1 [internal] load build definition' >&2"]))
                .unwrap();
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("#1 [internal] load build definition"), "{}", logs);
    }
}
