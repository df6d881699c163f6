use crate::config::LoggingConfig;
use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, appending to the configured log file.
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| ConfigError::Logging(format!("bad filter `{}`: {e}", config.filter)))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| ConfigError::io(&config.file, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
