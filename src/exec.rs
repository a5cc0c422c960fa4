//! Running external commands.
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Process spawning as seen by configurations.
///
/// [`SystemExecutor`] is the only production implementation; tests
/// substitute a mock to observe the program and arguments.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `program` with the terminal attached and wait for it to exit.
    ///
    /// A non-zero exit is reported through [`ExecResult::success`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_attached(&self, program: &str, args: &[String]) -> Result<ExecResult>;

    /// Resolve `program` to an executable path (absolute paths are checked
    /// as-is, bare names are searched on `PATH`).
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_attached(&self, program: &str, args: &[String]) -> Result<ExecResult> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
