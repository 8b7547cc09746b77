//! External command invocation abstraction.
//!
//! The run shells out to three tools: the transfer tool for downloads, GPG
//! for signature verification, and shasum for checksum verification. All
//! three go through the [`CommandExecutor`] trait so tests can substitute a
//! fake invoker without touching the network or a keyring.

use crate::error::{Result, WheelError};
use camino::Utf8Path;
use std::process::{Command, Output};

/// Abstraction for running external commands.
///
/// The contract is deliberately small: a command name, its arguments, an
/// optional working directory, and the captured output with exit status.
/// Every invocation blocks until the tool exits.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the
    /// command. A non-zero exit is not an error at this layer; callers
    /// inspect `Output::status`.
    fn run(&self, command: &str, args: &[&str]) -> Result<Output>;

    /// Runs a command in the given working directory and returns the
    /// captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the
    /// command.
    fn run_in(&self, command: &str, args: &[&str], working_dir: &Utf8Path) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use terraform_wheels::exec::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("wget", &["--version"])?;
/// assert!(output.status.success());
/// # Ok::<(), terraform_wheels::error::WheelError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    fn spawn(command: &str, args: &[&str], working_dir: Option<&Utf8Path>) -> Result<Output> {
        let mut cmd = Command::new(command);
        cmd.args(args);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir.as_std_path());
        }
        cmd.output().map_err(WheelError::from)
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, command: &str, args: &[&str]) -> Result<Output> {
        Self::spawn(command, args, None)
    }

    fn run_in(&self, command: &str, args: &[&str], working_dir: &Utf8Path) -> Result<Output> {
        Self::spawn(command, args, Some(working_dir))
    }
}
