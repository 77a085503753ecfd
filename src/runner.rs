//! Application Runner Module
//!
//! Shared entry point: logging, settings, runtime and mode selection.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Settings, XdgDirs};

/// Runtime configuration gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Settings file; defaults to the XDG config location
    pub config_path: Option<PathBuf>,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Timeout override in seconds
    pub timeout_secs: Option<u64>,
    /// Ask one question and exit instead of opening the TUI
    pub ask: Option<String>,
}

impl AppConfig {
    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,memberchat=debug"
        }
    }
}

/// Run the application in the mode `config` selects.
///
/// # Errors
///
/// Returns an error if settings are invalid, the terminal cannot be set up,
/// or the runtime fails to start.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let dirs = XdgDirs::new();

    match config.ask.as_deref() {
        Some(_) => init_stderr_logging(),
        None => init_file_logging(&config, &dirs)?,
    }

    let path = config
        .config_path
        .clone()
        .unwrap_or_else(|| dirs.settings_file());
    let mut settings = Settings::load(&path)?;
    settings.apply_overrides(config.endpoint.clone(), config.timeout_secs);
    settings.validate()?;
    tracing::debug!(?settings, path = %path.display(), "settings loaded");

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    match config.ask {
        Some(question) => runtime.block_on(crate::cli::ask(&settings, &question)),
        None => runtime.block_on(crate::tui::run(&settings)),
    }
}

/// One-shot mode keeps stdout clean; only warnings reach stderr.
fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// The TUI owns the terminal, so logs go to a file.
fn init_file_logging(config: &AppConfig, dirs: &XdgDirs) -> anyhow::Result<()> {
    dirs.ensure_state_dir()
        .with_context(|| format!("Failed to create {}", dirs.state.display()))?;
    let log_path = dirs.log_file();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    if config.debug || config.verbose {
        tracing::info!("Debug logging enabled");
    }
    Ok(())
}
