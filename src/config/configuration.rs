//! Built, runnable configurations.
use anyhow::Result;
use std::fmt;

use crate::error::RunError;
use crate::exec::{ExecResult, Executor};

/// A fully resolved command line: program plus arguments.
///
/// # Examples
///
/// ```
/// use quicklinks::config::Invocation;
///
/// let inv = Invocation::new("/bin/echo", vec!["hello world".into(), "x".into()]);
/// assert_eq!(inv.to_string(), "/bin/echo 'hello world' x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Create an invocation.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Program path or name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in the order they are passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quote a word for display when it would not survive a shell as-is.
fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// A runnable unit built from one entry.
///
/// Immutable once built: running it depends only on the stored invocation
/// and on the state of the machine at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    key: String,
    kind: String,
    invocation: Invocation,
}

impl Configuration {
    /// Create a configuration.
    #[must_use]
    pub fn new(key: impl Into<String>, kind: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            invocation,
        }
    }

    /// Key used to select the configuration.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Kind of the entry the configuration was built from.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The command line run by [`run`](Self::run).
    #[must_use]
    pub const fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Execute the invocation with the terminal attached.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ProgramNotFound`] if the program cannot be
    /// resolved, [`RunError::Failed`] on a non-zero exit, or the spawn
    /// error of the executor.
    pub fn run(&self, executor: &dyn Executor) -> Result<ExecResult> {
        let program = self.invocation.program();
        if executor.which(program).is_none() {
            return Err(RunError::ProgramNotFound {
                program: program.to_string(),
            }
            .into());
        }

        let result = executor.run_attached(program, self.invocation.args())?;
        if !result.success {
            return Err(RunError::Failed {
                key: self.key.clone(),
                code: result.code.unwrap_or(-1),
            }
            .into());
        }
        Ok(result)
    }
}
