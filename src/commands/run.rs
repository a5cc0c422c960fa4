//! Load, choose and run.
use std::io::{BufRead, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result};

use super::select::{numbered_lines, read_choices, select};
use crate::cli::Cli;
use crate::config::{self, Configuration};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Logger, RunStatus};
use crate::platform::{Host, SystemHost};

/// Run the launcher: load, choose, then run the chosen configurations.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved or loaded, a choice is
/// unknown, or any chosen configuration fails.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    let file = super::resolve_file(cli.file.as_deref())?;
    let stdin = std::io::stdin();
    run_with(
        cli,
        &file,
        &SystemHost::default(),
        &SystemExecutor,
        &mut stdin.lock(),
        log,
    )
}

/// [`run`] with injected host, executor and prompt input.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    cli: &Cli,
    file: &Path,
    host: &dyn Host,
    executor: &dyn Executor,
    input: &mut dyn BufRead,
    log: &Logger,
) -> Result<()> {
    log.debug(&format!("quicklinks {}", crate::cli::VERSION));
    let configs = config::load_configurations_with(file, host)
        .with_context(|| format!("loading {}", file.display()))?;
    log.debug(&format!(
        "loaded {} entries from {}",
        configs.len(),
        file.display()
    ));
    for key in config::duplicate_keys(&configs) {
        log.warn(&format!(
            "key '{key}' is used more than once; the later entries are only reachable by number"
        ));
    }

    if cli.list {
        print_numbered(&configs);
        return Ok(());
    }

    let choices = if cli.choices.is_empty() {
        print_numbered(&configs);
        prompt();
        read_choices(input)?
    } else {
        cli.choices.clone()
    };

    let selected = select(&configs, &choices)?;
    match selected.as_slice() {
        [] => {
            log.warn("nothing chosen");
            Ok(())
        }
        [single] => run_one(single, cli.dry_run, executor, log).map(|_| ()),
        many => run_all(many, cli.dry_run, executor, log),
    }
}

#[allow(clippy::print_stdout)]
fn print_numbered(configs: &[Configuration]) {
    for line in numbered_lines(configs) {
        println!("{line}");
    }
}

#[allow(clippy::print_stdout)]
fn prompt() {
    print!("Please enter at least one number or key: ");
    std::io::stdout().flush().ok();
}

/// Run each configuration in order, print the summary, and bail if any failed.
fn run_all(
    selected: &[&Configuration],
    dry_run: bool,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<()> {
    for config in selected {
        match run_one(config, dry_run, executor, log) {
            Ok(status) => log.record_run(config.key(), status, None),
            Err(e) => {
                let msg = format!("{e:#}");
                log.error(&msg);
                log.record_run(config.key(), RunStatus::Failed, Some(&msg));
            }
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} run(s) failed");
    }
    Ok(())
}

fn run_one(
    config: &Configuration,
    dry_run: bool,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<RunStatus> {
    let invocation = config.invocation().to_string();
    if dry_run {
        log.dry_run(config.key(), &invocation);
        return Ok(RunStatus::DryRun);
    }
    log.run_started(config.key(), &invocation);
    config.run(executor)?;
    Ok(RunStatus::Ok)
}
