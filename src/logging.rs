use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{AppConfig, ConfigManager, LogLevel};

/// Configuration for the logging system
pub struct LogConfig {
    /// Directory where log files will be stored
    pub log_dir: PathBuf,
    /// Prefix for log file names
    pub file_prefix: String,
    /// Maximum number of log files to keep (rotation)
    pub max_files: usize,
    /// Level used when RUST_LOG is not set
    pub level: LogLevel,
    /// Whether to also write JSON logs to `log_dir`
    pub log_to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: ConfigManager::get_log_dir(),
            file_prefix: "toast".to_string(),
            max_files: 5,
            level: LogLevel::Info,
            log_to_file: false,
        }
    }
}

impl LogConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_files: config.log_max_files,
            level: config.log_level,
            log_to_file: config.log_to_file,
            ..Self::default()
        }
    }
}

/// Initialize the logging system
///
/// Human readable logs go to stderr so stdout stays free for the caller.
/// With `log_to_file` a daily rotated JSON log is written as well.
///
/// # Log Targets
/// - `main` - Application lifecycle
/// - `toast::manager` - App id registration
/// - `toast::notification` - Toasts being shown
/// - `toast::stage` - Staged scripts
/// - `toast::host` - Scripting host runs
///
/// # Example
/// ```bash
/// # Everything from the host, including the generated scripts when enabled
/// RUST_LOG=toast::host=debug toast -t "Hello" -m "World"
/// ```
pub fn init_logging(config: LogConfig) -> Result<LogGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let (file_layer, worker_guard) = if config.log_to_file {
        std::fs::create_dir_all(&config.log_dir).context("Failed to create log directory")?;

        let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .filename_prefix(&config.file_prefix)
            .filename_suffix("log")
            .max_log_files(config.max_files)
            .build(&config.log_dir)
            .context("Failed to create file appender")?;

        // The guard MUST be kept alive for the entire application lifetime
        let (non_blocking_file, worker_guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .json()
            .with_writer(non_blocking_file)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_filter(env_filter.clone());

        (Some(file_layer), Some(worker_guard))
    } else {
        (None, None)
    };

    let stderr_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        target: "main",
        log_dir = %config.log_dir.display(),
        log_to_file = config.log_to_file,
        "Logging system initialized"
    );

    Ok(LogGuard {
        _worker_guard: worker_guard,
    })
}

/// Guard that ensures file logs are flushed before exit
pub struct LogGuard {
    _worker_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.file_prefix, "toast");
        assert_eq!(config.max_files, 5);
        assert!(!config.log_to_file);
    }

    #[test]
    fn test_from_app_config() {
        let app_config = AppConfig {
            log_to_file: true,
            log_level: LogLevel::Trace,
            log_max_files: 2,
            ..AppConfig::default()
        };

        let config = LogConfig::from_app_config(&app_config);
        assert!(config.log_to_file);
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.max_files, 2);
    }

    #[test]
    fn test_log_directory_creation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let config = LogConfig {
            log_dir: log_dir.clone(),
            file_prefix: "test".to_string(),
            max_files: 3,
            level: LogLevel::Debug,
            log_to_file: true,
        };

        let result = init_logging(config);
        assert!(result.is_ok());
        assert!(log_dir.exists());

        // Keep the guard alive during test
        let _guard = result.unwrap();
    }
}
