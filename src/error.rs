//! Domain-specific error types for the quicklinks launcher.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Loading a configuration file returns a [`LoadError`]; running a built
//! configuration returns a [`RunError`] wrapped in [`anyhow::Error`]; the
//! command layer converts everything to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! LoadError
//! ├── Io                       configuration file unreadable
//! ├── Parse(ParseError)        malformed line
//! ├── Schema(SchemaError)      missing or unexpected parameter
//! ├── UnknownKind              no registered kind for the entry
//! └── Precondition             rsync host/mount/src/dst checks
//! RunError                     program missing, non-zero exit
//! SelectError                  unknown choice, unreadable prompt input
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort loading a configuration file.
///
/// The first error aborts the whole load: no partial list of
/// configurations is ever returned alongside one of these.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The configuration file could not be read.
    #[error("can't read file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line of the file could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An entry does not match the parameter schema of its kind.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// No registered kind claims the entry's kind string.
    #[error("don't know how to build entry with kind '{0}'")]
    UnknownKind(String),

    /// A build-time precondition of an entry failed.
    #[error("entry '{key}': {source}")]
    Precondition {
        /// Key of the entry that failed.
        key: String,
        /// The failed precondition.
        source: PreconditionError,
    },
}

/// Malformed lines in the configuration file.
///
/// Every variant carries the 1-based line number and the raw line text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A section header has a kind but no key.
    #[error("key is missing after '{header}' on line {line}: {text}")]
    MissingKey {
        /// Trimmed content between the brackets.
        header: String,
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
    },

    /// A section header key still contains a space after trimming.
    #[error("key '{key}' must not contain spaces on line {line}: {text}")]
    KeyContainsSpace {
        /// The offending key.
        key: String,
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
    },

    /// A section header has an empty kind.
    #[error("can't parse entry kind on line {line}: {text}")]
    MissingKind {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
    },

    /// A parameter line appears before any section header.
    #[error("no entry started with [kind key] before line {line}: {text}")]
    NoEntryOpen {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
    },

    /// The line is neither a header, a comment, a parameter, nor blank.
    #[error("can't parse line {line}: {text}")]
    Unrecognized {
        /// 1-based line number.
        line: usize,
        /// Raw line text.
        text: String,
    },
}

/// Parameter schema violations for a given kind.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A mandatory parameter is absent.
    #[error("{kind} entry is missing parameter {name}")]
    MissingParameter {
        /// Kind of the entry.
        kind: String,
        /// Name of the missing parameter.
        name: String,
    },

    /// A parameter is neither mandatory nor optional for the kind.
    #[error("{kind} entry has unexpected parameter {name}")]
    UnexpectedParameter {
        /// Kind of the entry.
        kind: String,
        /// Name of the unexpected parameter.
        name: String,
    },
}

/// Build-time preconditions of the `rsync` kind.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreconditionError {
    /// The entry is bound to another machine.
    #[error("this rsync execution must be executed on {expected}")]
    WrongHost {
        /// Host name required by the entry.
        expected: String,
    },

    /// The current host name could not be determined.
    #[error("can't determine the host name: {reason}")]
    HostnameUnavailable {
        /// Underlying failure.
        reason: String,
    },

    /// Checking a mount point failed.
    #[error("error while checking mount point {mount_point} state: {reason}")]
    MountCheckFailed {
        /// The mount point being checked.
        mount_point: String,
        /// Underlying failure.
        reason: String,
    },

    /// A mount point listed in `cmp` is not mounted.
    #[error("mount point {mount_point} is not mounted")]
    NotMounted {
        /// The mount point that is not mounted.
        mount_point: String,
    },

    /// No non-empty `src` value was provided.
    #[error("'src' must be provided at least once")]
    EmptySource,

    /// The `dst` value is empty.
    #[error("'dst' can't be empty")]
    EmptyDestination,
}

/// Run-time failures of a built configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunError {
    /// The program of the invocation cannot be found or is not executable.
    #[error("program '{program}' not found")]
    ProgramNotFound {
        /// Program path or name.
        program: String,
    },

    /// The program ran but exited unsuccessfully.
    #[error("'{key}' failed (exit {code})")]
    Failed {
        /// Key of the configuration.
        key: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
    },
}

/// Failures while resolving the user's selection.
#[derive(Error, Debug)]
pub enum SelectError {
    /// A choice matches neither a key nor an index.
    #[error("can't find entry with key or number '{0}'")]
    UnknownChoice(String),

    /// Reading the interactive selection failed.
    #[error("reading selection: {0}")]
    Input(#[from] std::io::Error),
}
