//! Logging setup
//!
//! Logs go to stderr (stdout carries the rendered pages) or to a file through
//! a non-blocking writer.
//!
//! ## Example
//!
//! ```rust,ignore
//! use hatewatch::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::defaults;
use crate::error::{ClientError, Result};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// JSON without span lists
    JsonCompact,
}

impl FromStr for OutputFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            other => Err(ClientError::ConfigurationError(format!(
                "Invalid log format: {other}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Parse a level name (trace, debug, info, warn, error).
pub fn parse_level(level: &str) -> Result<tracing::Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => Err(ClientError::ConfigurationError(format!(
            "Invalid log level: {other}. Valid options: trace, debug, info, warn, error"
        ))),
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stderr when no log file is set
    pub enable_console: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Debug-level text logs on stderr.
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// Filter directive for this crate at the configured level.
    pub fn directive(&self) -> String {
        format!("hatewatch={}", self.log_level.to_string().to_lowercase())
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        self.log_level = Some(parse_level(level)?);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn build(self) -> SubscriberConfig {
        let defaults = SubscriberConfig::default();
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(defaults.log_level),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(defaults.enable_console),
            log_file: self.log_file,
        }
    }
}

fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    let file_name = path.file_name().ok_or_else(|| {
        ClientError::ConfigurationError(format!("Invalid log file path: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| {
            ClientError::ConfigurationError(format!(
                "Cannot open log file {}: {e}",
                path.display()
            ))
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(writer), guard))
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the level from `config`. Returns the writer
/// guard when logging to a file; keep it alive until exit so buffered lines
/// are flushed. Calling this twice is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directive()));

    let (writer, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, Some(guard))
        }
        None if config.enable_console => (BoxMakeWriter::new(std::io::stderr), None),
        None => (BoxMakeWriter::new(std::io::sink), None),
    };
    let ansi = config.log_file.is_none();

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .json()
            .with_span_list(false)
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("global default trace dispatcher has already been set") {
                Ok(guard)
            } else {
                Err(ClientError::ConfigurationError(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Build a config from `HATEWATCH_LOG_LEVEL`, `HATEWATCH_LOG_FORMAT` and
/// `HATEWATCH_LOG_FILE` as returned by `lookup`.
pub fn config_from_lookup<F>(lookup: F) -> Result<SubscriberConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = SubscriberConfig::builder();
    if let Some(level) = lookup(defaults::env::LOG_LEVEL) {
        builder = builder.log_level_str(&level)?;
    }
    if let Some(format) = lookup(defaults::env::LOG_FORMAT) {
        builder = builder.output_format(format.parse()?);
    }
    if let Some(path) = lookup(defaults::env::LOG_FILE) {
        builder = builder.log_file(path);
    }
    Ok(builder.build())
}

/// Install the subscriber configured by the process environment.
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(config_from_lookup(|key| std::env::var(key).ok())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_levels_and_formats() {
        assert_eq!(parse_level("DEBUG").unwrap(), tracing::Level::DEBUG);
        assert!(parse_level("verbose").is_err());
        assert_eq!(
            "json-compact".parse::<OutputFormat>().unwrap(),
            OutputFormat::JsonCompact
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn builder_defaults_to_warn_on_stderr() {
        let config = SubscriberConfig::builder().build();
        assert_eq!(config.log_level, tracing::Level::WARN);
        assert!(config.enable_console);
        assert!(config.log_file.is_none());
        assert_eq!(config.directive(), "hatewatch=warn");
        assert_eq!(SubscriberConfig::debug().directive(), "hatewatch=debug");
    }

    #[test]
    fn reads_environment_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HATEWATCH_LOG_LEVEL", "info"),
            ("HATEWATCH_LOG_FORMAT", "json"),
            ("HATEWATCH_LOG_FILE", "/tmp/hatewatch.log"),
        ]);
        let config = config_from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/hatewatch.log")));

        let bad = config_from_lookup(|k| (k == "HATEWATCH_LOG_LEVEL").then(|| "loud".into()));
        assert!(matches!(bad, Err(ClientError::ConfigurationError(_))));
    }

    // Installing a global subscriber here would clash with `traced_test`
    // elsewhere in this test binary, so only the writer is exercised.
    #[test]
    fn file_writer_needs_a_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let (_writer, _guard) = file_writer(&dir.path().join("hatewatch.log")).unwrap();
        assert!(matches!(
            file_writer(Path::new("/")),
            Err(ClientError::ConfigurationError(_))
        ));
    }
}
