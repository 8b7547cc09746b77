//! Shared test utilities for the wheel builder crate.

use crate::error::{Result, WheelError};
use crate::exec::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "wget").
    pub command: &'static str,
    /// The arguments to pass to the command.
    pub args: Vec<String>,
    /// The working directory the command must be run in, if any.
    pub working_dir: Option<Utf8PathBuf>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify the exact tool invocation sequence without side
/// effects.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }

    fn next_call(
        &self,
        command: &str,
        args: &[&str],
        working_dir: Option<&Utf8Path>,
    ) -> Result<Output> {
        let mut expected = self.expected.borrow_mut();
        let Some(call) = expected.pop_front() else {
            return Err(WheelError::StubMismatch {
                message: format!("unexpected invocation of {command}"),
            });
        };

        assert_eq!(call.command, command);
        let args_owned: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
        assert_eq!(call.args, args_owned);
        assert_eq!(call.working_dir.as_deref(), working_dir);

        call.result
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, command: &str, args: &[&str]) -> Result<Output> {
        self.next_call(command, args, None)
    }

    fn run_in(&self, command: &str, args: &[&str], working_dir: &Utf8Path) -> Result<Output> {
        self.next_call(command, args, Some(working_dir))
    }
}
