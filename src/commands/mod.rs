//! Front-end commands behind the `quicklinks` binary.
pub mod run;
pub mod select;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Resolve the configuration file from `--file` or `QUICKLINKS_FILE`.
///
/// # Errors
///
/// Returns an error if neither source names a file.
pub fn resolve_file(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_file_from(explicit, std::env::var_os("QUICKLINKS_FILE"))
}

fn resolve_file_from(explicit: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => anyhow::bail!("missing configuration file. Pass --file or set QUICKLINKS_FILE"),
    }
}
