//! Run records and the event targets shared by the logger and the layers.

/// Event targets understood by the console formatter and the file layer.
pub(super) mod target {
    /// Section header.
    pub const STAGE: &str = "quicklinks::stage";
    /// A configuration is about to run; fields `key` and `invocation`.
    pub const RUN: &str = "quicklinks::run";
    /// A configuration was only printed; fields `key` and `invocation`.
    pub const DRY_RUN: &str = "quicklinks::dry_run";
    /// One summary line; fields `key`, `status` and `detail`.
    pub const OUTCOME: &str = "quicklinks::outcome";
    /// Summary totals; fields `ok`, `dry_run` and `failed`.
    pub const TOTALS: &str = "quicklinks::totals";
}

/// Result of running one configuration, for summary reporting.
#[derive(Debug, Clone)]
pub struct RunEntry {
    /// Key of the configuration.
    pub name: String,
    /// Final status of the run.
    pub status: RunStatus,
    /// Optional detail message (e.g., error description).
    pub message: Option<String>,
}

/// Status of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The command exited successfully.
    Ok,
    /// Dry-run mode; the command line was only printed.
    DryRun,
    /// The command could not be started or exited unsuccessfully.
    Failed,
}

impl RunStatus {
    /// Word used for this status in summaries and the log file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        assert_eq!(RunStatus::Ok.label(), "ok");
        assert_eq!(RunStatus::DryRun.label(), "dry-run");
        assert_eq!(RunStatus::Failed.label(), "failed");
    }

    #[test]
    fn run_entry_clone() {
        let entry = RunEntry {
            name: "backup".to_string(),
            status: RunStatus::Failed,
            message: Some("exit 23".to_string()),
        };
        let cloned = entry.clone();
        assert_eq!(cloned.name, entry.name);
        assert_eq!(cloned.status, entry.status);
        assert_eq!(cloned.message, entry.message);
    }
}
