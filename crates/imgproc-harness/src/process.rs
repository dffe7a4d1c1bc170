//! Child process execution and outcome classification.
//!
//! [`ProcessRunner`] is the only place the harness touches real processes.
//! It never fails: a child that cannot be launched is reported through
//! [`ExitDisposition::FailedToStart`] and classified by [`check_outcome`]
//! like any other abnormal termination.

use crate::result::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, trace};

/// A program and its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program to execute, as given on the command line
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Name used in diagnostics (the program, as invoked)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.program
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a child process ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitDisposition {
    /// Exited through normal status reporting
    Exited(i32),
    /// Killed by a signal (number, where the platform reports one)
    Signaled(Option<i32>),
    /// Never ran
    FailedToStart(String),
}

/// Result of running a [`CommandSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// How the child ended
    pub disposition: ExitDisposition,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutcome {
    /// Normal exit with `code`
    #[must_use]
    pub fn exited(code: i32) -> Self {
        Self::from_disposition(ExitDisposition::Exited(code))
    }

    /// Killed by `signal`
    #[must_use]
    pub fn signaled(signal: Option<i32>) -> Self {
        Self::from_disposition(ExitDisposition::Signaled(signal))
    }

    /// Launch failure; the reason doubles as the captured error stream
    #[must_use]
    pub fn failed_to_start(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            stderr: format!("{reason}\n"),
            ..Self::from_disposition(ExitDisposition::FailedToStart(reason))
        }
    }

    fn from_disposition(disposition: ExitDisposition) -> Self {
        Self {
            disposition,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Set captured standard output
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Set captured standard error
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// True when the child reported an exit status
    #[must_use]
    pub const fn exited_normally(&self) -> bool {
        matches!(self.disposition, ExitDisposition::Exited(_))
    }

    /// Exit status; only meaningful when [`Self::exited_normally`]
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self.disposition {
            ExitDisposition::Exited(code) => Some(code),
            _ => None,
        }
    }

    /// Captured standard error
    #[must_use]
    pub fn stderr_text(&self) -> &str {
        &self.stderr
    }

    /// Exited with status 0
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.disposition, ExitDisposition::Exited(0))
    }
}

/// Runs a command to completion and captures its streams.
pub trait ProcessRunner {
    /// Run `command`, blocking until it ends. No timeout.
    fn run(&self, command: &CommandSpec) -> ProcessOutcome;
}

/// [`ProcessRunner`] backed by [`std::process::Command`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> ProcessOutcome {
        debug!(command = %command, "running");

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                let outcome = ProcessOutcome {
                    disposition: disposition_of(output.status),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                };
                debug!(program = %command.program, disposition = ?outcome.disposition, "finished");
                trace!(stdout = %outcome.stdout, stderr = %outcome.stderr, "captured");
                outcome
            }
            Err(e) => {
                debug!(program = %command.program, error = %e, "failed to start");
                ProcessOutcome::failed_to_start(format!("{}: {e}", command.program))
            }
        }
    }
}

fn disposition_of(status: ExitStatus) -> ExitDisposition {
    status
        .code()
        .map_or_else(|| ExitDisposition::Signaled(signal_of(status)), ExitDisposition::Exited)
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}

/// Map an outcome onto the harness error taxonomy, handing back
/// successful outcomes for their captured output.
///
/// # Errors
///
/// - [`HarnessError::AbnormalTermination`] if the child never ran or was killed
/// - [`HarnessError::NonZeroExit`] if it exited with a non-zero status
pub fn check_outcome(command: &CommandSpec, outcome: ProcessOutcome) -> HarnessResult<ProcessOutcome> {
    match outcome.disposition {
        ExitDisposition::Exited(0) => Ok(outcome),
        ExitDisposition::Exited(code) => Err(HarnessError::NonZeroExit {
            command: command.name().to_string(),
            code,
            stderr: outcome.stderr,
        }),
        ExitDisposition::Signaled(_) | ExitDisposition::FailedToStart(_) => {
            Err(HarnessError::AbnormalTermination {
                command: command.name().to_string(),
                stderr: outcome.stderr,
            })
        }
    }
}
