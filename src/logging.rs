//! Logging
//!
//! `tracing` subscriber setup for pkgfs. `LoggingConfig` comes from the
//! `[logging]` config section with the `--log-*` flags laid over it;
//! `PKGFS_LOG`, `PKGFS_LOG_FORMAT`, `PKGFS_LOG_OUTPUT` and `PKGFS_LOG_FILE`
//! win over both.

use crate::error::ApiError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LEVEL_ENV: &str = "PKGFS_LOG";
const FORMAT_ENV: &str = "PKGFS_LOG_FORMAT";
const OUTPUT_ENV: &str = "PKGFS_LOG_OUTPUT";
const FILE_ENV: &str = "PKGFS_LOG_FILE";

/// Event encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Append to the log file; keeps CLI output clean
    #[default]
    File,
    #[serde(rename = "file+stderr")]
    #[value(name = "file+stderr")]
    FileAndStderr,
    /// stdout and stderr
    Both,
}

impl LogOutput {
    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file; None means `pkgfs.log` in the platform state directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colors for text written to a terminal
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-target levels, e.g. `"pkgfs::store" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(init_failed);
    }

    let filter = build_filter(config)?;
    let format = env_override::<LogFormat>(FORMAT_ENV)?.unwrap_or(config.format);
    let output = env_override::<LogOutput>(OUTPUT_ENV)?.unwrap_or(config.output);
    let ansi = config.color && !output.writes_file();

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(make_writer(output, config.file.clone())?);
    let registry = Registry::default().with(filter);

    match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry.with(layer.with_ansi(ansi)).try_init(),
    }
    .map_err(init_failed)
}

fn init_failed(err: impl std::fmt::Display) -> ApiError {
    ApiError::ConfigError(format!("Failed to initialize logging: {}", err))
}

/// Parse `var` as a `T` when it is set and non-empty.
fn env_override<T: ValueEnum>(var: &str) -> Result<Option<T>, ApiError> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => T::from_str(&value, true)
            .map(Some)
            .map_err(|e| ApiError::ConfigError(format!("Invalid {}: {}", var, e))),
        _ => Ok(None),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(LEVEL_ENV) {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level).map_err(|e| {
        ApiError::ConfigError(format!("Invalid log level '{}': {}", config.level, e))
    })?;
    for (target, level) in &config.modules {
        let directive = format!("{}={}", target, level)
            .parse()
            .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn make_writer(output: LogOutput, configured: Option<PathBuf>) -> Result<BoxMakeWriter, ApiError> {
    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(configured)?)),
        LogOutput::FileAndStderr => {
            BoxMakeWriter::new(Mutex::new(open_log_file(configured)?).and(std::io::stderr))
        }
    };
    Ok(writer)
}

/// Resolve the log file path: PKGFS_LOG_FILE, then the configured file, then
/// `pkgfs.log` in the platform state directory.
///
/// `--log-file` reaches this function through the configured file.
pub fn resolve_log_file_path(configured: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(path) = std::env::var_os(FILE_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = configured.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    let dirs = directories::ProjectDirs::from("", "pkgfs", "pkgfs").ok_or_else(|| {
        ApiError::ConfigError("Could not determine a state directory for the log file".to_string())
    })?;
    let state_dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(state_dir.join("pkgfs.log"))
}

fn open_log_file(configured: Option<PathBuf>) -> Result<std::fs::File, ApiError> {
    let path = resolve_log_file_path(configured)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?)
}
