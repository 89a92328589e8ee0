//! External command execution utilities.
//!
//! Provides a Builder-based API for running validators (`xmllint`,
//! `svgcheck`) with a wall-clock timeout and captured output.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let outcome = Cmd::new("xmllint")
//!     .arg("--noout")
//!     .arg("card.svg")
//!     .timeout(Duration::from_secs(10))
//!     .run()?;
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

/// Poll interval while waiting for a child with a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

/// Result of a command that was started.
#[derive(Debug)]
pub enum Outcome {
    /// The process exited on its own.
    Finished {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    /// The process was killed after the timeout elapsed.
    TimedOut,
}

impl Outcome {
    /// Exited with status 0.
    pub fn success(&self) -> bool {
        matches!(self, Outcome::Finished { status, .. } if status.success())
    }

    /// Combined stderr + stdout, trimmed (empty for timeouts).
    pub fn diagnostics(&self) -> String {
        match self {
            Outcome::Finished { stdout, stderr, .. } => {
                let mut text = stderr.trim().to_string();
                let stdout = stdout.trim();
                if !stdout.is_empty() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(stdout);
                }
                text
            }
            Outcome::TimedOut => String::new(),
        }
    }
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Kill the process if it runs longer than `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command.
    ///
    /// A non-zero exit is not an error here; only failing to start or
    /// wait for the process is.
    pub fn run(self) -> Result<Outcome> {
        let name = self.program_name();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Drain pipes on threads so a chatty child cannot block on a full pipe
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child
                .try_wait()
                .with_context(|| format!("Failed to wait for `{name}`"))?
            {
                break status;
            }
            if let Some(limit) = self.timeout
                && started.elapsed() >= limit
            {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(Outcome::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok(Outcome::Finished {
            status,
            stdout: join_reader(stdout),
            stderr: join_reader(stderr),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_builder() {
        let cmd = Cmd::new("xmllint")
            .arg("--noout")
            .arg("a.svg")
            .arg("b.svg")
            .timeout(Duration::from_secs(3));

        assert_eq!(cmd.program, OsString::from("xmllint"));
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_empty_args_filtered() {
        let cmd = Cmd::new("echo").arg("").arg("a").arg("").arg("b");
        assert_eq!(cmd.args.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_simple_command() {
        let outcome = Cmd::new("echo").arg("hello").run().unwrap();
        assert!(outcome.success());
        assert!(outcome.diagnostics().contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_not_an_error() {
        let outcome = Cmd::new("false").run().unwrap();
        assert!(!outcome.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_process() {
        let outcome = Cmd::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(100))
            .run()
            .unwrap();
        assert!(matches!(outcome, Outcome::TimedOut));
        assert!(!outcome.success());
    }

    #[test]
    fn test_missing_program_errors() {
        assert!(Cmd::new("definitely-not-a-real-program-xyz").run().is_err());
    }
}
