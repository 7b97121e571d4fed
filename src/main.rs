mod cli;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{ConfigManager, LogLevel};
use logging::LogConfig;
use std::path::Path;
use toast_notif::{ToastManager, resolve_icon};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConfigManager::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose {
        config.log_scripts = true;
        if !matches!(config.log_level, LogLevel::Trace | LogLevel::Debug) {
            config.log_level = LogLevel::Debug;
        }
    }

    // Keep the guard alive until the toast has been dispatched
    let _log_guard = logging::init_logging(LogConfig::from_app_config(&config))
        .context("Failed to initialize logging system")?;

    let host = config.script_host();

    let (audio, error) = cli.audio();
    if let Some(e) = error {
        tracing::warn!(target: "main", error = %e, fallback = %audio, "Unknown audio, using the fallback");
    }
    let (duration, error) = cli.duration();
    if let Some(e) = error {
        tracing::warn!(target: "main", error = %e, fallback = %duration, "Unknown duration, using the fallback");
    }

    if cli.register {
        let manager = ToastManager::with_host(
            &cli.app_id,
            cli.display_name.clone().unwrap_or_default(),
            cli.icon.clone().unwrap_or_default(),
            host,
        )
        .context("Failed to create toast manager")?;

        let toast = manager.new_toast(
            &cli.title,
            &cli.message,
            &cli.activation_type,
            &cli.activation_arg,
            cli.actions(),
            audio,
            cli.looping,
            duration,
        );
        manager.show(&toast).context("Failed to show toast")?;
    } else {
        let icon = resolve_icon(cli.icon.as_deref().unwrap_or(Path::new("")))
            .context("Failed to resolve icon path")?;

        cli.notification(&icon, audio, duration)
            .show_with(&host)
            .context("Failed to show toast")?;
    }

    tracing::debug!(target: "main", "Toast dispatched");

    Ok(())
}
