use super::config::BootstrapConfig;
use super::level::LogLevel;
use super::timestamp::HumanTimestamp;
use crate::domain::{BootstrapError, Format, Mode};
use crate::sink::{FanOutWriter, PlainText, open_append};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tracing::Dispatch;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, fmt, prelude::*};

/// Where a logger's records end up, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// The resolved, immutable shape of a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    pub mode: Mode,
    pub format: Format,
    pub threshold: LogLevel,
    pub destinations: Vec<Destination>,
    /// Only set for human-readable output.
    pub time_format: Option<String>,
}

/// A fully configured logger.
///
/// Cheap to clone; clones share the same subscriber and sinks. Pass it to
/// whatever needs to log, or install it once as the global default.
#[derive(Debug, Clone)]
pub struct LoggerHandle {
    settings: LoggerSettings,
    writer: FanOutWriter,
    dispatch: Dispatch,
}

impl LoggerHandle {
    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn format(&self) -> Format {
        self.settings.format
    }

    pub fn threshold(&self) -> LogLevel {
        self.settings.threshold
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.settings.destinations
    }

    pub fn time_format(&self) -> Option<&str> {
        self.settings.time_format.as_deref()
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Runs `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Makes this logger the process-wide default. Succeeds at most once per
    /// process.
    pub fn install_global(&self) -> Result<(), BootstrapError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.flush_all()
    }

    /// Flushes every destination. The file itself closes once the last
    /// clone of the handle is gone.
    pub fn shutdown(self) -> io::Result<()> {
        self.flush()
    }
}

/// Builds a [`LoggerHandle`] from a [`BootstrapConfig`].
pub struct LoggingSystem {
    config: BootstrapConfig,
    stdout: Option<Box<dyn Write + Send>>,
}

impl LoggingSystem {
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            stdout: None,
        }
    }

    /// Replaces the process stdout destination, e.g. with a capture buffer.
    pub fn with_stdout<W>(mut self, stdout: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.stdout = Some(Box::new(stdout));
        self
    }

    pub fn build(self) -> Result<LoggerHandle, BootstrapError> {
        let LoggingSystem { config, stdout } = self;
        config.validate()?;
        let mode = config.mode();
        let format = mode.format();

        // Colour only reaches a terminal; a substituted stdout follows the config.
        let ansi = !config.no_color && (stdout.is_some() || io::stdout().is_terminal());
        let stdout = stdout.unwrap_or_else(|| Box::new(io::stdout()));
        let mut writer = FanOutWriter::new().with_member(stdout);
        let mut destinations = vec![Destination::Stdout];

        if mode.writes_local_file() {
            let path = config.log_file.clone();
            let file = open_append(&path).map_err(|source| BootstrapError::LogFile {
                path: path.clone(),
                source,
            })?;
            writer = writer.with_member(PlainText::new(file));
            destinations.push(Destination::File(path));
        }

        let settings = LoggerSettings {
            mode,
            format,
            threshold: LogLevel::MOST_VERBOSE,
            destinations,
            time_format: match format {
                Format::HumanReadable => Some(config.time_format.clone()),
                Format::Structured => None,
            },
        };

        let dispatch = build_dispatch(&settings, ansi, writer.clone());
        let handle = LoggerHandle {
            settings,
            writer,
            dispatch,
        };

        handle.in_scope(|| {
            info!(
                mode = %mode,
                appenv = %config.appenv,
                threshold = handle.threshold().as_str(),
                "Logger initialised in {} mode",
                mode
            );
        });

        Ok(handle)
    }
}

fn build_dispatch(settings: &LoggerSettings, ansi: bool, writer: FanOutWriter) -> Dispatch {
    let filter = LevelFilter::from(settings.threshold);

    match settings.format {
        Format::Structured => {
            let layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter);
            Dispatch::new(tracing_subscriber::registry().with(layer))
        }
        Format::HumanReadable => {
            let timer = settings
                .time_format
                .as_deref()
                .map(HumanTimestamp::new)
                .unwrap_or_default();
            let layer = fmt::layer()
                .with_timer(timer)
                .with_target(true)
                .with_level(true)
                .with_ansi(ansi)
                .with_writer(writer)
                .with_filter(filter);
            Dispatch::new(tracing_subscriber::registry().with(layer))
        }
    }
}

/// Builds the logger for `mode` with default settings. Exits the process if
/// the development log file cannot be opened.
pub fn initialize(mode: &str) -> LoggerHandle {
    initialize_with(&BootstrapConfig::for_mode(mode))
}

/// Like [`initialize`], with explicit settings.
pub fn initialize_with(config: &BootstrapConfig) -> LoggerHandle {
    match LoggingSystem::new(config.clone()).build() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    }
}

/// Reads the configuration from the environment (`APPENV`, `LOG_FILE`, ...)
/// and initializes from it.
pub fn initialize_from_env() -> LoggerHandle {
    match BootstrapConfig::from_env() {
        Ok(config) => initialize_with(&config),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}
