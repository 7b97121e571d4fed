use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toast_notif::ScriptHost;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Settings stored as JSON in `~/.toast/config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Whether to write logs to file
    pub log_to_file: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: LogLevel,
    /// Maximum number of log files to keep
    pub log_max_files: usize,
    /// Scripting host executable
    pub host_program: String,
    /// Arguments passed to the host before the script path
    pub host_args: Vec<String>,
    /// Seconds to wait for the host, 0 waits forever
    pub host_timeout_secs: u64,
    /// Log every generated script at debug level
    pub log_scripts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = ScriptHost::default();

        Self {
            log_to_file: false,
            log_level: LogLevel::Info,
            log_max_files: 5,
            host_program: host.program().to_string(),
            host_args: host.args().to_vec(),
            host_timeout_secs: host.timeout().map_or(0, |t| t.as_secs()),
            log_scripts: false,
        }
    }
}

impl AppConfig {
    /// The scripting host described by this configuration
    pub fn script_host(&self) -> ScriptHost {
        let timeout = match self.host_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        ScriptHost::new()
            .with_program(&self.host_program)
            .with_args(self.host_args.iter().cloned())
            .with_timeout(timeout)
            .with_script_logging(self.log_scripts)
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Get the config file path (~/.toast/config.json)
    pub fn get_config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get user home directory")?;
        Ok(home_dir.join(".toast").join("config.json"))
    }

    /// Get the log directory path
    pub fn get_log_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".toast")
            .join("logs")
    }

    /// Load configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&Self::get_config_path()?),
        }
    }

    /// Load configuration from the specified path, using defaults for missing fields
    fn load_from_path(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        // serde's #[serde(default)] handles missing fields automatically
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}
