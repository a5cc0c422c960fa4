//! Host facts consulted while building configurations.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

/// Mount table read by [`SystemHost`].
const PROC_MOUNTS: &str = "/proc/self/mounts";

/// Read-only view of the machine a configuration is built on.
///
/// Building an `rsync` entry consults these oracles for its `host` and
/// `cmp` preconditions; nothing here mutates the system.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Name of the current machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the host name cannot be determined.
    fn hostname(&self) -> Result<String>;

    /// Whether `mount_point` is currently a mount point.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount table cannot be inspected.
    fn is_mounted(&self, mount_point: &str) -> Result<bool>;
}

/// [`Host`] backed by the running system.
#[derive(Debug, Clone)]
pub struct SystemHost {
    mounts: PathBuf,
}

impl Default for SystemHost {
    fn default() -> Self {
        Self {
            mounts: PathBuf::from(PROC_MOUNTS),
        }
    }
}

impl SystemHost {
    /// Create a host that reads its mount table from `mounts`.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_mount_table(mounts: impl Into<PathBuf>) -> Self {
        Self {
            mounts: mounts.into(),
        }
    }
}

impl Host for SystemHost {
    fn hostname(&self) -> Result<String> {
        let name = hostname::get().context("querying host name")?;
        Ok(name.to_string_lossy().into_owned())
    }

    fn is_mounted(&self, mount_point: &str) -> Result<bool> {
        let table = std::fs::read_to_string(&self.mounts)
            .with_context(|| format!("reading {}", self.mounts.display()))?;
        Ok(mount_table_contains(&table, mount_point))
    }
}

/// Whether the `/proc/mounts`-formatted `table` lists `mount_point`.
///
/// Trailing slashes are ignored on both sides and the octal escapes the
/// kernel uses for whitespace in paths (`\040`, `\011`, ...) are decoded.
fn mount_table_contains(table: &str, mount_point: &str) -> bool {
    let wanted = normalize(mount_point);
    table
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|target| normalize(&unescape_octal(target)) == wanted)
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Decode `\NNN` octal escapes as written by the kernel in mount tables.
fn unescape_octal(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let digits: String = chars.clone().take(3).collect();
            if digits.len() == 3
                && digits.bytes().all(|b| (b'0'..=b'7').contains(&b))
                && let Ok(code) = u8::from_str_radix(&digits, 8)
            {
                out.push(char::from(code));
                chars.nth(2);
                continue;
            }
        }
        out.push(c);
    }
    out
}
