//! Entry kinds: per-kind parameter schemas and command assembly.
pub mod program;
pub mod rsync;
pub mod unison;

use crate::config::entry::Entry;
use crate::config::{Configuration, Invocation};
use crate::error::LoadError;
use crate::platform::Host;

/// A supported entry kind.
///
/// Each kind declares its name and parameter schema, and assembles the
/// command line of a validated entry. Adding a kind means implementing this
/// trait and listing the implementation in [`all_kinds`].
pub trait Kind {
    /// Kind string matched against `[<kind> <key>]` headers.
    fn name(&self) -> &'static str;

    /// Parameters that must appear at least once.
    fn mandatory(&self) -> &'static [&'static str];

    /// Parameters that may appear.
    fn optional(&self) -> &'static [&'static str] {
        &[]
    }

    /// Assemble the command line of an entry already checked against
    /// [`mandatory`](Self::mandatory) and [`optional`](Self::optional).
    ///
    /// Nothing is executed; `host` is only consulted for build-time
    /// preconditions.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if a build-time precondition fails.
    fn assemble(&self, entry: &Entry, host: &dyn Host) -> Result<Invocation, LoadError>;

    /// Validate `entry` against this kind's schema and build it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Schema`] before any precondition is evaluated
    /// when the entry does not match the schema, otherwise the error of
    /// [`assemble`](Self::assemble).
    fn build(&self, entry: &Entry, host: &dyn Host) -> Result<Configuration, LoadError> {
        entry.check_params(self.mandatory(), self.optional())?;
        let invocation = self.assemble(entry, host)?;
        Ok(Configuration::new(entry.key(), self.name(), invocation))
    }
}

/// The fixed, ordered set of supported kinds.
#[must_use]
pub fn all_kinds() -> Vec<Box<dyn Kind>> {
    vec![
        Box::new(unison::Unison),
        Box::new(program::Program),
        Box::new(rsync::Rsync),
    ]
}

/// Find the kind whose name equals `name` exactly (first match wins).
#[must_use]
pub fn find<'a>(kinds: &'a [Box<dyn Kind>], name: &str) -> Option<&'a dyn Kind> {
    kinds.iter().find(|k| k.name() == name).map(Box::as_ref)
}

/// Build every entry in order with the registered kinds.
///
/// # Errors
///
/// Returns the first failure: [`LoadError::UnknownKind`] when no kind
/// claims an entry, or the build error of the matching kind. No partial
/// list is returned.
pub fn build_all(entries: &[Entry], host: &dyn Host) -> Result<Vec<Configuration>, LoadError> {
    let kinds = all_kinds();
    entries
        .iter()
        .map(|entry| {
            let kind = find(&kinds, entry.kind())
                .ok_or_else(|| LoadError::UnknownKind(entry.kind().to_string()))?;
            let config = kind.build(entry, host)?;
            tracing::debug!("built {} entry '{}': {}", kind.name(), config.key(), config.invocation());
            Ok(config)
        })
        .collect()
}

/// Shared helpers for kind unit tests.
#[cfg(test)]
pub mod test_helpers {
    use crate::config::entry::{Entry, ParameterPair};
    use crate::platform::MockHost;

    /// Build an entry from `(name, value)` pairs.
    #[must_use]
    pub fn entry(kind: &str, key: &str, params: &[(&str, &str)]) -> Entry {
        Entry::new(
            kind,
            key,
            params
                .iter()
                .map(|(name, value)| ParameterPair::new(*name, *value))
                .collect(),
        )
    }

    /// A host that fails the test if any oracle is consulted.
    #[must_use]
    pub fn untouched_host() -> MockHost {
        let mut host = MockHost::new();
        host.expect_hostname().never();
        host.expect_is_mounted().never();
        host
    }
}
