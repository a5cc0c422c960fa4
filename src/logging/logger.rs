//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{RunEntry, RunStatus, target};
use super::utils::log_file_path;

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/quicklinks/<command>.log` (default `~/.cache/quicklinks/<command>.log`)
/// with timestamps, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    runs: Mutex<Vec<RunEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary.  The log file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber);
    /// this constructor does not write to it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            runs: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Create a logger whose summary points at `path`.
    #[cfg(test)]
    pub(crate) const fn with_log_file(path: PathBuf) -> Self {
        Self {
            runs: Mutex::new(Vec::new()),
            log_file: Some(path),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded runs (test-only).
    #[cfg(test)]
    pub(crate) fn run_entries(&self) -> Vec<RunEntry> {
        self.runs.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: target::STAGE, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Announce that configuration `key` is about to run `invocation`.
    pub fn run_started(&self, key: &str, invocation: &str) {
        tracing::info!(target: target::RUN, key, invocation, "{key}");
    }

    /// Show the `invocation` configuration `key` would run.
    pub fn dry_run(&self, key: &str, invocation: &str) {
        tracing::info!(target: target::DRY_RUN, key, invocation, "{key}");
    }

    /// Record the outcome of one configuration for the summary.
    pub fn record_run(&self, name: &str, status: RunStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.runs.lock() {
            guard.push(RunEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed runs.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.runs.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|r| r.status == RunStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded runs.
    #[allow(clippy::print_stdout)]
    pub fn print_summary(&self) {
        let runs = match self.runs.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if runs.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u64;
        let mut dry_run = 0u64;
        let mut failed = 0u64;

        for run in &runs {
            match run.status {
                RunStatus::Ok => ok += 1,
                RunStatus::DryRun => dry_run += 1,
                RunStatus::Failed => failed += 1,
            }
            tracing::info!(
                target: target::OUTCOME,
                key = run.name.as_str(),
                status = run.status.label(),
                detail = run.message.as_deref().unwrap_or_default(),
                "{}",
                run.name
            );
        }

        println!();
        let total = ok + dry_run + failed;
        tracing::info!(target: target::TOTALS, ok, dry_run, failed, "{total} runs");

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}
