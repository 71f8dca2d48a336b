//! Structured logging setup
//!
//! Format (json for production, pretty for development) and output
//! destination (stdout or an append-mode file) are independent choices, so
//! the writer is selected once and boxed before the format branch.

use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber from configuration
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a log
/// file cannot be opened or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let writer = make_writer(config)?;
    let base = fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.format.as_str() == "json" {
        registry
            .with(base.json().with_current_span(true).with_file(true))
            .try_init()?;
    } else {
        registry.with(base.pretty().with_file(false)).try_init()?;
    }

    Ok(())
}

/// Open the configured output: an append-mode file, or stdout
fn make_writer(config: &LoggingConfig) -> anyhow::Result<BoxMakeWriter> {
    match &config.file_path {
        Some(file_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stdout)),
    }
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {level}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(parse_log_level("trace").is_ok());
        assert!(parse_log_level("debug").is_ok());
        assert!(parse_log_level("info").is_ok());
        assert!(parse_log_level("warn").is_ok());
        assert!(parse_log_level("error").is_ok());
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_make_writer_opens_log_file() {
        let path = std::env::temp_dir().join(format!("crosscast-log-{}.log", std::process::id()));
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
            file_path: Some(path.to_string_lossy().into_owned()),
        };

        assert!(make_writer(&config).is_ok());
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_make_writer_rejects_unwritable_path() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: Some("/nonexistent-dir/crosscast.log".to_string()),
        };

        assert!(make_writer(&config).is_err());
    }
}
