//! One-way mirroring through rsync.
//!
//! ```text
//! [rsync photos]
//! host = thisbox
//! cmp = /mnt/nas
//! flag = -av
//! exclude = *.tmp
//! srcPrefix = /home/me
//! src = photos
//! src = videos
//! dst = /mnt/nas/backup
//! ```
//!
//! Preconditions are evaluated when the entry is built, in this order:
//! `host`, every `cmp` mount point, `src`, `dst`. The command line is
//! `flag...`, `--exclude <pattern>...`, sources, destination.
use super::Kind;
use crate::config::Invocation;
use crate::config::entry::Entry;
use crate::error::{LoadError, PreconditionError};
use crate::platform::Host;

/// Well-known location of the rsync binary.
pub const RSYNC: &str = "/usr/bin/rsync";

/// Mirror `src` paths to `dst` with rsync.
#[derive(Debug)]
pub struct Rsync;

impl Kind for Rsync {
    fn name(&self) -> &'static str {
        "rsync"
    }

    fn mandatory(&self) -> &'static [&'static str] {
        &["src", "dst"]
    }

    fn optional(&self) -> &'static [&'static str] {
        &["host", "cmp", "flag", "exclude", "srcPrefix"]
    }

    fn assemble(&self, entry: &Entry, host: &dyn Host) -> Result<Invocation, LoadError> {
        let plan = MirrorPlan::from_entry(entry);
        let args = plan
            .arguments(host)
            .map_err(|source| LoadError::Precondition {
                key: entry.key().to_string(),
                source,
            })?;
        Ok(Invocation::new(RSYNC, args))
    }
}

/// The rsync parameters of an entry, before preconditions are checked.
#[derive(Debug)]
struct MirrorPlan<'a> {
    host: &'a str,
    mount_points: Vec<&'a str>,
    sources: Vec<&'a str>,
    destination: &'a str,
    flags: Vec<&'a str>,
    excludes: Vec<&'a str>,
    source_prefix: &'a str,
}

impl<'a> MirrorPlan<'a> {
    fn from_entry(entry: &'a Entry) -> Self {
        Self {
            host: entry.value("host"),
            mount_points: entry.values("cmp"),
            sources: entry.values("src"),
            destination: entry.value("dst"),
            flags: entry.values("flag"),
            excludes: entry.values("exclude"),
            source_prefix: entry.value("srcPrefix"),
        }
    }

    /// Check the preconditions and assemble the rsync argument list.
    fn arguments(&self, host: &dyn Host) -> Result<Vec<String>, PreconditionError> {
        self.check_host(host)?;
        self.check_mounts(host)?;
        if self.sources.is_empty() {
            return Err(PreconditionError::EmptySource);
        }
        if self.destination.is_empty() {
            return Err(PreconditionError::EmptyDestination);
        }

        let mut args: Vec<String> = self.flags.iter().map(|f| (*f).to_string()).collect();
        for pattern in &self.excludes {
            args.push("--exclude".to_string());
            args.push((*pattern).to_string());
        }
        args.extend(
            self.sources
                .iter()
                .map(|src| rewrite_source(src, self.source_prefix)),
        );
        args.push(self.destination.to_string());
        Ok(args)
    }

    fn check_host(&self, host: &dyn Host) -> Result<(), PreconditionError> {
        if self.host.is_empty() {
            return Ok(());
        }
        let current = host
            .hostname()
            .map_err(|e| PreconditionError::HostnameUnavailable {
                reason: format!("{e:#}"),
            })?;
        if current == self.host {
            Ok(())
        } else {
            Err(PreconditionError::WrongHost {
                expected: self.host.to_string(),
            })
        }
    }

    fn check_mounts(&self, host: &dyn Host) -> Result<(), PreconditionError> {
        for mount_point in &self.mount_points {
            let mounted =
                host.is_mounted(mount_point)
                    .map_err(|e| PreconditionError::MountCheckFailed {
                        mount_point: (*mount_point).to_string(),
                        reason: format!("{e:#}"),
                    })?;
            if !mounted {
                return Err(PreconditionError::NotMounted {
                    mount_point: (*mount_point).to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Prefix a source path.
///
/// An empty prefix leaves the source untouched; otherwise one trailing `/`
/// is dropped from the prefix, one leading `/` from the source, and the two
/// are joined with `/`.
///
/// # Examples
///
/// ```
/// use quicklinks::kinds::rsync::rewrite_source;
///
/// assert_eq!(rewrite_source("/a/b", "pfx/"), "pfx/a/b");
/// assert_eq!(rewrite_source("a/b", ""), "a/b");
/// ```
#[must_use]
pub fn rewrite_source(source: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return source.to_string();
    }
    let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
    let source = source.strip_prefix('/').unwrap_or(source);
    format!("{prefix}/{source}")
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::kinds::test_helpers::{entry, untouched_host};
    use crate::platform::MockHost;

    fn host_named(name: &'static str) -> MockHost {
        let mut host = MockHost::new();
        host.expect_hostname()
            .returning(move || Ok(name.to_string()));
        host
    }

    fn precondition(err: LoadError) -> PreconditionError {
        match err {
            LoadError::Precondition { source, .. } => source,
            other => panic!("expected a precondition error, got {other:?}"),
        }
    }

    #[test]
    fn arguments_follow_flag_exclude_source_destination_order() {
        let e = entry(
            "rsync",
            "photos",
            &[
                ("dst", "/mnt/nas/backup"),
                ("src", "/home/me/photos"),
                ("exclude", "*.tmp"),
                ("flag", "-a"),
                ("src", "/home/me/videos"),
                ("exclude", ".cache"),
                ("flag", "--delete"),
            ],
        );
        let config = Rsync.build(&e, &untouched_host()).unwrap();
        assert_eq!(config.invocation().program(), RSYNC);
        assert_eq!(
            config.invocation().args(),
            [
                "-a",
                "--delete",
                "--exclude",
                "*.tmp",
                "--exclude",
                ".cache",
                "/home/me/photos",
                "/home/me/videos",
                "/mnt/nas/backup",
            ]
        );
    }

    #[test]
    fn source_prefix_rewrites_every_source() {
        let e = entry(
            "rsync",
            "p",
            &[
                ("srcPrefix", "/home/me/"),
                ("src", "/photos"),
                ("src", "videos"),
                ("dst", "nas:/backup"),
            ],
        );
        let config = Rsync.build(&e, &untouched_host()).unwrap();
        assert_eq!(
            config.invocation().args(),
            ["/home/me/photos", "/home/me/videos", "nas:/backup"]
        );
    }

    #[test]
    fn rewrite_source_examples() {
        assert_eq!(rewrite_source("/a/b", "pfx/"), "pfx/a/b");
        assert_eq!(rewrite_source("a/b", ""), "a/b");
        assert_eq!(rewrite_source("a/b", "pfx"), "pfx/a/b");
        // only one slash is stripped on each side
        assert_eq!(rewrite_source("//a", "pfx//"), "pfx///a");
    }

    #[test]
    fn missing_dst_fails_schema_before_host_checks() {
        let e = entry("rsync", "p", &[("host", "otherbox"), ("src", "/a")]);
        let err = Rsync.build(&e, &untouched_host()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::Schema(SchemaError::MissingParameter { ref name, .. }) if name == "dst"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn wrong_host_fails_before_emptiness_checks() {
        let e = entry(
            "rsync",
            "p",
            &[("host", "otherbox"), ("src", ""), ("dst", "")],
        );
        let err = Rsync.build(&e, &host_named("thisbox")).unwrap_err();
        assert!(err.to_string().contains("otherbox"), "got {err}");
        assert_eq!(
            precondition(err),
            PreconditionError::WrongHost {
                expected: "otherbox".to_string()
            }
        );
    }

    #[test]
    fn matching_host_passes() {
        let e = entry(
            "rsync",
            "p",
            &[("host", "thisbox"), ("src", "/a"), ("dst", "/b")],
        );
        assert!(Rsync.build(&e, &host_named("thisbox")).is_ok());
    }

    #[test]
    fn hostname_failure_is_reported() {
        let mut host = MockHost::new();
        host.expect_hostname()
            .returning(|| Err(anyhow::anyhow!("no uts name")));
        let e = entry("rsync", "p", &[("host", "a"), ("src", "/a"), ("dst", "/b")]);
        let err = precondition(Rsync.build(&e, &host).unwrap_err());
        assert!(
            matches!(err, PreconditionError::HostnameUnavailable { ref reason } if reason.contains("no uts name")),
            "got {err:?}"
        );
    }

    #[test]
    fn unmounted_mount_point_fails() {
        let mut host = MockHost::new();
        host.expect_is_mounted()
            .withf(|mp| mp == "/mnt/a")
            .returning(|_| Ok(true));
        host.expect_is_mounted()
            .withf(|mp| mp == "/mnt/b")
            .returning(|_| Ok(false));
        let e = entry(
            "rsync",
            "p",
            &[("cmp", "/mnt/a"), ("cmp", "/mnt/b"), ("src", "/a"), ("dst", "/b")],
        );
        assert_eq!(
            precondition(Rsync.build(&e, &host).unwrap_err()),
            PreconditionError::NotMounted {
                mount_point: "/mnt/b".to_string()
            }
        );
    }

    #[test]
    fn unmounted_mount_point_fails_before_emptiness_checks() {
        let mut host = MockHost::new();
        host.expect_is_mounted()
            .withf(|mp| mp == "/mnt/b")
            .times(1)
            .returning(|_| Ok(false));
        let e = entry("rsync", "p", &[("cmp", "/mnt/b"), ("src", ""), ("dst", "")]);
        assert_eq!(
            precondition(Rsync.build(&e, &host).unwrap_err()),
            PreconditionError::NotMounted {
                mount_point: "/mnt/b".to_string()
            }
        );
    }

    #[test]
    fn wrong_host_skips_mount_checks() {
        let mut host = MockHost::new();
        host.expect_hostname()
            .times(1)
            .returning(|| Ok("thisbox".to_string()));
        host.expect_is_mounted().never();
        let e = entry(
            "rsync",
            "p",
            &[("host", "otherbox"), ("cmp", "/mnt/b"), ("src", "/a"), ("dst", "/b")],
        );
        assert!(matches!(
            precondition(Rsync.build(&e, &host).unwrap_err()),
            PreconditionError::WrongHost { .. }
        ));
    }

    #[test]
    fn mount_check_error_is_distinct_from_unmounted() {
        let mut host = MockHost::new();
        host.expect_is_mounted()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));
        let e = entry("rsync", "p", &[("cmp", "/mnt/a"), ("src", "/a"), ("dst", "/b")]);
        let err = precondition(Rsync.build(&e, &host).unwrap_err());
        assert!(
            matches!(err, PreconditionError::MountCheckFailed { ref mount_point, .. } if mount_point == "/mnt/a"),
            "got {err:?}"
        );
    }

    #[test]
    fn empty_source_values_fail() {
        let e = entry("rsync", "p", &[("src", ""), ("dst", "/b")]);
        assert_eq!(
            precondition(Rsync.build(&e, &untouched_host()).unwrap_err()),
            PreconditionError::EmptySource
        );
    }

    #[test]
    fn empty_destination_fails() {
        let e = entry("rsync", "p", &[("src", "/a"), ("dst", "")]);
        assert_eq!(
            precondition(Rsync.build(&e, &untouched_host()).unwrap_err()),
            PreconditionError::EmptyDestination
        );
    }

    #[test]
    fn empty_flag_values_are_dropped() {
        let e = entry("rsync", "p", &[("flag", ""), ("src", "/a"), ("dst", "/b")]);
        let config = Rsync.build(&e, &untouched_host()).unwrap();
        assert_eq!(config.invocation().args(), ["/a", "/b"]);
    }
}
