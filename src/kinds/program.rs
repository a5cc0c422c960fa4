//! Arbitrary programs with a fixed argument list.
use super::Kind;
use crate::config::Invocation;
use crate::config::entry::Entry;
use crate::error::LoadError;
use crate::platform::Host;

/// Run an arbitrary program.
///
/// ```text
/// [prog backup]
/// exe = /bin/echo
/// arg = hello
/// arg = world
/// ```
#[derive(Debug)]
pub struct Program;

impl Kind for Program {
    fn name(&self) -> &'static str {
        "prog"
    }

    fn mandatory(&self) -> &'static [&'static str] {
        &["exe"]
    }

    fn optional(&self) -> &'static [&'static str] {
        &["arg"]
    }

    fn assemble(&self, entry: &Entry, _host: &dyn Host) -> Result<Invocation, LoadError> {
        let args = entry.values("arg").into_iter().map(String::from).collect();
        Ok(Invocation::new(entry.value("exe"), args))
    }
}
