//! docrelay - capture a PDF or a YouTube transcript and hand it to an AI chat.
//!
//! Main entry point for the docrelay CLI.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docrelay_browser::{BrowserManager, BrowserManagerConfig};
use docrelay_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, SettingsStore};

mod cli;
mod cmd_capture;
mod cmd_send;
mod cmd_settings;

use cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to `logging.dir` with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::expand_path(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("docrelay")
        .filename_suffix("log")
        .max_log_files(logging.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes only while its guard is alive.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Reject an invalid configuration; log its warnings.
fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    match result.into_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

pub(crate) fn browser(config: &Config) -> Arc<BrowserManager> {
    Arc::new(BrowserManager::new(BrowserManagerConfig::from(&config.browser)))
}

pub(crate) fn settings_store(config: &Config) -> SettingsStore {
    SettingsStore::new(ConfigLoader::expand_path(&config.settings_path))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing file yields defaults.
    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    validate_config(&config)?;
    info!("docrelay {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Send {
            url,
            tab,
            platform,
            prompt,
            summarize,
        } => cmd_send::send(config, url, tab, platform, prompt, summarize).await,
        Commands::Probe { url } => cmd_capture::probe(&config, &url).await,
        Commands::Transcript { tab } => cmd_capture::transcript(&config, tab).await,
        Commands::Settings { action } => cmd_settings::handle_settings_command(&config, action),
        Commands::Message { json } => cmd_send::message(config, &json).await,
    }
}
