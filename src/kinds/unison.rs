//! Bidirectional sync through unison profiles.
use super::Kind;
use crate::config::Invocation;
use crate::config::entry::Entry;
use crate::error::LoadError;
use crate::platform::Host;

/// Well-known location of the unison binary.
pub const UNISON: &str = "/usr/bin/unison";

/// Bidirectional sync through a unison profile.
///
/// The profile is passed as-is; whether it exists is only discovered when
/// unison runs.
#[derive(Debug)]
pub struct Unison;

impl Kind for Unison {
    fn name(&self) -> &'static str {
        "unison"
    }

    fn mandatory(&self) -> &'static [&'static str] {
        &["profile"]
    }

    fn assemble(&self, entry: &Entry, _host: &dyn Host) -> Result<Invocation, LoadError> {
        Ok(Invocation::new(
            UNISON,
            vec![entry.value("profile").to_string()],
        ))
    }
}
