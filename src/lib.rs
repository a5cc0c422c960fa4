//! Command launcher driven by a small configuration DSL.
//!
//! A configuration file holds `[kind key]` entries followed by
//! `name = value` parameters. Each entry is validated against the schema of
//! its kind and built into a [`config::Configuration`]: a named program
//! invocation that runs on demand.
//!
//! - **[`config`]**: parse the DSL and build configurations
//! - **[`kinds`]**: the registered kinds (`unison`, `prog`, `rsync`) and their schemas
//! - **[`platform`]** / **[`exec`]**: host and process oracles behind traits
//! - **[`commands`]**: selection and the run loop behind the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod kinds;
pub mod logging;
pub mod platform;
