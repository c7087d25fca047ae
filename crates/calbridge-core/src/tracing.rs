//! Log subscriber setup for hosts embedding the bridge.
//!
//! The bridge only emits events: `debug!` for every native dispatch and
//! `warn!` for read-only field advisories, deprecated entry points and
//! operations that degrade to a no-op. Hosts with their own subscriber need
//! nothing from this module.
//!
//! ```ignore
//! use calbridge_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::new(tracing::Level::DEBUG).with_format(TracingOutputFormat::Json))?;
//! ```

use std::str::FromStr;

use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events the default filter lets through.
const BRIDGE_TARGETS: &[&str] = &["calbridge", "calbridge_core", "calbridge_protocol"];

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber is already installed.
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive does not parse.
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    /// Unknown output format name.
    #[error("unknown log format: {0:?} (expected pretty, compact or json)")]
    UnknownFormat(String),
}

/// How events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    Pretty,
    #[default]
    Compact,
    /// One JSON object per line, for forwarding to a native logger.
    Json,
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(TracingError::UnknownFormat(other.to_string())),
        }
    }
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level applied to the bridge crates when no directive is given.
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Explicit filter directive; wins over `RUST_LOG` and `level`.
    pub directive: Option<String>,
    /// Include source file and line.
    pub location: bool,
    pub timestamps: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(Level::WARN)
    }
}

impl TracingConfig {
    /// Compact output at `level` for the bridge crates.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            format: TracingOutputFormat::Compact,
            directive: None,
            location: false,
            timestamps: true,
        }
    }

    /// Builder method to set the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method to set an explicit filter directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Builder method to print file and line of each event.
    #[must_use]
    pub fn with_location(mut self, location: bool) -> Self {
        self.location = location;
        self
    }

    /// Builder method to drop timestamps, e.g. when the host adds its own.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Returns the directive used when neither `directive` nor `RUST_LOG`
    /// is set, e.g. `calbridge=warn,calbridge_core=warn,...`.
    pub fn default_directive(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        BRIDGE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Resolves the effective filter.
    pub fn filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(directive) = &self.directive {
            return Ok(EnvFilter::try_new(directive)?);
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.default_directive())?),
        }
    }

    /// Builds the subscriber without installing it.
    pub fn build(&self) -> Result<impl Subscriber + Send + Sync + 'static, TracingError> {
        let layer = fmt::layer()
            .with_file(self.location)
            .with_line_number(self.location)
            .with_target(true);

        let layer = match (self.format, self.timestamps) {
            (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
            (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
            (TracingOutputFormat::Json, true) => layer.json().boxed(),
            (TracingOutputFormat::Json, false) => layer.json().without_time().boxed(),
        };

        Ok(tracing_subscriber::registry()
            .with(self.filter()?)
            .with(layer))
    }
}

/// Installs the subscriber described by `config` globally.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    tracing::subscriber::set_global_default(config.build()?)?;
    Ok(())
}
