//! Log file location and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Return `<cache>/quicklinks/<command>.log`, creating the directory.
///
/// `<cache>` is `$XDG_CACHE_HOME`, or `$HOME/.cache` when that is unset.
/// Returns `None` when neither variable is usable or the directory cannot
/// be created; the launcher then logs to the console only.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    log_file_path_from(
        std::env::var_os("XDG_CACHE_HOME"),
        std::env::var_os("HOME"),
        command,
    )
}

fn log_file_path_from(
    xdg_cache_home: Option<OsString>,
    home: Option<OsString>,
    command: &str,
) -> Option<PathBuf> {
    let cache = xdg_cache_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|dir| PathBuf::from(dir).join(".cache"))
        })?;
    let dir = cache.join("quicklinks");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn xdg_cache_home_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let path = log_file_path_from(
            Some(tmp.path().as_os_str().to_owned()),
            Some(OsString::from("/nonexistent-home")),
            "quicklinks",
        );
        assert_eq!(
            path,
            Some(tmp.path().join("quicklinks").join("quicklinks.log"))
        );
        assert!(tmp.path().join("quicklinks").is_dir());
    }

    #[test]
    fn home_cache_used_when_xdg_unset_or_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let expected = Some(tmp.path().join(".cache").join("quicklinks").join("run.log"));
        let home = Some(tmp.path().as_os_str().to_owned());
        assert_eq!(log_file_path_from(None, home.clone(), "run"), expected);
        assert_eq!(
            log_file_path_from(Some(OsString::new()), home, "run"),
            expected
        );
    }

    #[test]
    fn no_location_without_environment() {
        assert_eq!(log_file_path_from(None, None, "run"), None);
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":");
        assert_eq!(&s[5..6], ":");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
    }
}
