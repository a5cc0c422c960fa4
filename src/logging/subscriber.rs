//! Tracing subscriber setup: console formatter, file layer, and initialisation.
//!
//! Launcher events carry structured fields (`key`, `invocation`, `status`)
//! on the targets in [`target`]; both outputs render them from those fields,
//! so messages never embed colour codes.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::types::target;
use super::utils::{format_utc_datetime, format_utc_time, log_file_path};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const ARROW: &str = "\x1b[1;34m==>\x1b[0m";

/// The fields of one event that the launcher's outputs know how to render.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    key: String,
    invocation: String,
    status: String,
    detail: String,
    ok: u64,
    dry_run: u64,
    failed: u64,
}

impl EventFields {
    fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "key" => self.key = value,
            "invocation" => self.invocation = value,
            "status" => self.status = value,
            "detail" => self.detail = value,
            _ => {}
        }
    }

    fn detail_suffix(&self) -> String {
        if self.detail.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.detail)
        }
    }
}

impl tracing::field::Visit for EventFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.set(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        match field.name() {
            "ok" => self.ok = value,
            "dry_run" => self.dry_run = value,
            "failed" => self.failed = value,
            name => self.set(name, value.to_string()),
        }
    }
}

/// Plain-text rendering of an event for the log file, without timestamp.
fn file_line(level: Level, event_target: &str, f: &EventFields) -> String {
    match (level, event_target) {
        (_, target::STAGE) => format!("==> {}", f.message),
        (_, target::RUN) => format!("==> {}: {}", f.key, f.invocation),
        (_, target::DRY_RUN) => format!("==> {}: [dry run] {}", f.key, f.invocation),
        (_, target::OUTCOME) => format!("    {} {}{}", f.status, f.key, f.detail_suffix()),
        (_, target::TOTALS) => format!(
            "    {}: {} ok, {} dry-run, {} failed",
            f.message, f.ok, f.dry_run, f.failed
        ),
        (Level::ERROR, _) => format!("    [error] {}", f.message),
        (Level::WARN, _) => format!("    [warn] {}", f.message),
        (Level::DEBUG | Level::TRACE, _) => format!("    [debug] {}", f.message),
        _ => format!("    {}", f.message),
    }
}

/// Coloured rendering of an event for the terminal.
fn console_line(level: Level, event_target: &str, f: &EventFields) -> String {
    match (level, event_target) {
        (_, target::STAGE) => format!("{ARROW} {BOLD}{}{RESET}", f.message),
        (_, target::RUN) => format!(
            "{ARROW} {BOLD}{}{RESET} {DIM}{}{RESET}",
            f.key, f.invocation
        ),
        (_, target::DRY_RUN) => format!(
            "{ARROW} {BOLD}{}{RESET}\n  {YELLOW}[DRY RUN]{RESET} {}",
            f.key, f.invocation
        ),
        (_, target::OUTCOME) => {
            let (icon, color) = match f.status.as_str() {
                "ok" => ("✓", GREEN),
                "failed" => ("✗", RED),
                _ => ("~", DIM),
            };
            format!("  {color}{icon} {}{}{RESET}", f.key, f.detail_suffix())
        }
        (_, target::TOTALS) => {
            let mut line = format!("  {}: {GREEN}{} ok{RESET}, ", f.message, f.ok);
            let _ = write!(line, "{} dry-run, ", f.dry_run);
            let failed_color = if f.failed > 0 { RED } else { DIM };
            let _ = write!(line, "{failed_color}{} failed{RESET}", f.failed);
            line
        }
        (Level::ERROR, _) => format!("{RED}ERROR{RESET} {}", f.message),
        (Level::WARN, _) => format!("{YELLOW}WARN{RESET}  {}", f.message),
        (Level::INFO, _) => format!("  {}", f.message),
        _ => format!("  {DIM}{}{RESET}", f.message),
    }
}

/// A [`tracing_subscriber::Layer`] appending every event to the log file
/// with a timestamp.
///
/// Always captures events at `DEBUG` and above regardless of the console
/// verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` under the cache directory.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::create(&log_file_path(command)?)
    }

    /// Truncate `path`, write the run header, and keep it open for appending.
    ///
    /// Returns `None` if the file cannot be written.
    pub(super) fn create(path: &Path) -> Option<Self> {
        let header = format!(
            "# quicklinks {} started {} UTC\n",
            crate::cli::VERSION,
            format_utc_datetime()
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let line = file_line(
            *metadata.level(),
            metadata.target(),
            &EventFields::of(event),
        );
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{}] {line}", format_utc_time()).ok();
        }
    }
}

/// Console event format built on [`console_line`].
struct LauncherFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for LauncherFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let line = console_line(
            *metadata.level(),
            metadata.target(),
            &EventFields::of(event),
        );
        writeln!(writer, "{line}")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout (warnings and errors to stderr) at `INFO`,
/// or `DEBUG` when `verbose`. Every event, including `debug`, is also
/// written to `$XDG_CACHE_HOME/quicklinks/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(LauncherFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
