// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed configuration file, a fluent
// builder, and fixed host/executor fakes so each test can load and run
// configurations without touching the real machine.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use quicklinks::config::{self, Configuration};
use quicklinks::error::LoadError;
use quicklinks::exec::{ExecResult, Executor};
use quicklinks::platform::Host;

/// A [`Host`] with a fixed name and a fixed set of mount points.
#[derive(Debug, Clone)]
pub struct FakeHost {
    pub name: String,
    pub mounted: Vec<String>,
}

impl FakeHost {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mounted: Vec::new(),
        }
    }

    pub fn with_mount(mut self, mount_point: &str) -> Self {
        self.mounted.push(mount_point.to_string());
        self
    }
}

impl Host for FakeHost {
    fn hostname(&self) -> anyhow::Result<String> {
        Ok(self.name.clone())
    }

    fn is_mounted(&self, mount_point: &str) -> anyhow::Result<bool> {
        Ok(self.mounted.iter().any(|m| m == mount_point))
    }
}

/// An [`Executor`] that records invocations and exits with a fixed code.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub exit_code: i32,
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl RecordingExecutor {
    pub fn failing(exit_code: i32) -> Self {
        Self {
            exit_code,
            calls: RefCell::default(),
        }
    }
}

impl Executor for RecordingExecutor {
    fn run_attached(&self, program: &str, args: &[String]) -> anyhow::Result<ExecResult> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        Ok(ExecResult {
            success: self.exit_code == 0,
            code: Some(self.exit_code),
        })
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        Some(PathBuf::from(program))
    }
}

/// An isolated configuration file backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding the configuration file.
    pub root: tempfile::TempDir,
    file: PathBuf,
}

impl IntegrationTestContext {
    /// Path to the configuration file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Load the configuration file against `host`.
    pub fn load(&self, host: &dyn Host) -> Result<Vec<Configuration>, LoadError> {
        config::load_configurations_with(&self.file, host)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    lines: Vec<String>,
}

impl TestContextBuilder {
    /// Begin building an empty configuration file.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append raw DSL text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    /// Append a `[kind key]` entry with its parameters.
    pub fn with_entry(mut self, kind: &str, key: &str, params: &[(&str, &str)]) -> Self {
        self.lines.push(format!("[{kind} {key}]"));
        for (name, value) in params {
            self.lines.push(format!("{name} = {value}"));
        }
        self.lines.push(String::new());
        self
    }

    /// Write the file and return the context.
    pub fn build(self) -> IntegrationTestContext {
        let root = tempfile::tempdir().expect("create temp dir");
        let file = root.path().join("quicklinks.conf");
        std::fs::write(&file, self.lines.join("\n")).expect("write config file");
        IntegrationTestContext { root, file }
    }
}
