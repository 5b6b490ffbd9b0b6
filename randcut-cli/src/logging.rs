//! Structured logging for the `randcut` binary.
//!
//! Diagnostics go to `stderr` so the cut report on `stdout` stays
//! parseable. Span close events carry the timing of the `cli.*` and
//! `core.*` spans; per-trial `debug!` events stay hidden unless `RUST_LOG`
//! asks for them.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "RANDCUT_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or blank: this workspace's crates
/// at `info`, dependencies at `warn`.
pub const DEFAULT_DIRECTIVES: &str = "warn,randcut_cli=info,randcut_core=info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// An environment variable held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
    },
    /// `RANDCUT_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// `RUST_LOG` did not parse as filter directives.
    #[error("invalid log filter `{directives}`: {source}")]
    InvalidFilter {
        /// The rejected directives.
        directives: String,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// The `log` facade already has a logger.
    #[error("failed to bridge `log` records: {reason}")]
    LogBridgeFailed {
        /// Reason reported by the facade.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Output format of the `stderr` log stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per line, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "" | "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnsupportedFormat {
                provided: normalised,
            }),
        }
    }
}

/// Logging configuration resolved from the environment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogSettings {
    format: LogFormat,
    directives: String,
}

impl LogSettings {
    /// Reads `RANDCUT_LOG_FORMAT` and `RUST_LOG` from the process
    /// environment.
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidUnicode`] for non-UTF-8 values and
    /// [`LoggingError::UnsupportedFormat`] for an unknown format name.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode { name }),
        })
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, LoggingError>
    where
        F: FnMut(&'static str) -> Result<Option<String>, LoggingError>,
    {
        let format = match lookup(LOG_FORMAT_ENV)? {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let directives = lookup(EnvFilter::DEFAULT_ENV)?
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_owned());
        Ok(Self { format, directives })
    }

    /// Selected output format.
    #[must_use]
    #[rustfmt::skip]
    pub fn format(&self) -> LogFormat { self.format }

    /// Filter directives that will be applied.
    #[must_use]
    #[rustfmt::skip]
    pub fn directives(&self) -> &str { &self.directives }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.directives).map_err(|source| LoggingError::InvalidFilter {
            directives: self.directives.clone(),
            source,
        })
    }

    fn install(&self) -> Result<(), LoggingError> {
        let filter = self.filter()?;
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE);
        let layer = match self.format {
            LogFormat::Human => layer.with_target(false).boxed(),
            LogFormat::Json => layer
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        };

        LogTracer::init().map_err(|err| LoggingError::LogBridgeFailed {
            reason: err.to_string(),
        })?;
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|source| LoggingError::InstallFailed { source })
    }
}

/// Installs the global subscriber once and returns the active format.
///
/// Later calls return the format chosen by the first successful call
/// without reading the environment again.
///
/// # Errors
/// Returns [`LoggingError`] when the environment is unusable or another
/// logger already owns the global slot.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let settings = LogSettings::from_env()?;
    settings.install()?;
    Ok(*INSTALLED.get_or_init(|| settings.format()))
}
