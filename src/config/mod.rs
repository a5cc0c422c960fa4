//! Loading of configuration files into runnable configurations.
pub mod configuration;
pub mod entry;

pub use configuration::{Configuration, Invocation};

use std::path::Path;

use crate::error::LoadError;
use crate::kinds;
use crate::platform::{Host, SystemHost};

/// Read, parse, validate and build every entry of `path` on this machine.
///
/// # Errors
///
/// Returns the first [`LoadError`] met; no configuration is returned when
/// any entry fails.
pub fn load_configurations(path: &Path) -> Result<Vec<Configuration>, LoadError> {
    load_configurations_with(path, &SystemHost::default())
}

/// Like [`load_configurations`], consulting `host` for build-time
/// preconditions.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
/// first error of [`configurations_from_str`].
pub fn load_configurations_with(
    path: &Path,
    host: &dyn Host,
) -> Result<Vec<Configuration>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    configurations_from_str(&content, host)
}

/// Parse and build configurations from DSL text.
///
/// # Examples
///
/// ```
/// use quicklinks::config::configurations_from_str;
/// use quicklinks::platform::SystemHost;
///
/// let configs = configurations_from_str(
///     "[prog backup]\nexe = /bin/echo\narg = hello\narg = world\n",
///     &SystemHost::default(),
/// ).unwrap();
/// assert_eq!(configs[0].key(), "backup");
/// assert_eq!(configs[0].invocation().to_string(), "/bin/echo hello world");
/// ```
///
/// # Errors
///
/// Returns the first parse, schema, unknown-kind or precondition error.
pub fn configurations_from_str(
    content: &str,
    host: &dyn Host,
) -> Result<Vec<Configuration>, LoadError> {
    let entries = entry::parse_entries(content)?;
    tracing::debug!("parsed {} entries", entries.len());
    kinds::build_all(&entries, host)
}

/// Keys that appear on more than one configuration, in first-seen order.
///
/// Selection by key picks the first configuration with a given key, so
/// later duplicates can only be reached by index.
#[must_use]
pub fn duplicate_keys(configs: &[Configuration]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for config in configs {
        if !seen.insert(config.key()) && !duplicates.contains(&config.key()) {
            duplicates.push(config.key());
        }
    }
    duplicates
}
