//! Attendance Dashboard - Desktop attendance reporting against the dashboard backend.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use attendance_dashboard::client::ReportClient;
use attendance_dashboard::config::{AppConfig, ConfigLoadResult};
use attendance_dashboard::ui::App;

/// Desktop attendance reporting dashboard.
#[derive(Parser)]
#[command(name = "attendance-dashboard")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to a config file
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Override the backend base URL from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging();

    tracing::info!("Attendance Dashboard starting...");

    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else if let Some(path) = cli.config.clone() {
        path
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (mut config, mut startup_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = write_default_config(&config, &config_path) {
                tracing::warn!("{e:#}");
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), Some(format!("Invalid config, using defaults: {e}")))
        }
    };

    if let Some(base_url) = cli.base_url {
        tracing::info!("Base URL overridden: {}", base_url);
        config.api.base_url = base_url;
        if let Err(e) = config.validate() {
            tracing::warn!("Base URL override rejected: {}", e);
            startup_error = Some(format!("{e}, using defaults"));
            config.api = AppConfig::default().api;
        }
    }

    let rt = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("{e:#}");
            std::process::exit(1);
        }
    };

    let client = match ReportClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Backend: {}", client.base_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Attendance Dashboard")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Attendance Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc.egui_ctx.clone(), config, client, rt, startup_error)))),
    )
}

/// Log to stderr and to a daily rolling file when a data directory is available.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let log_dir = directories::ProjectDirs::from("", "", "attendance-dashboard").map(|d| d.data_local_dir().join("logs"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "attendance-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr_layer).init();
            None
        }
    }
}

/// Create the tokio runtime for async operations.
fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

fn write_default_config(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    config
        .save(path)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    tracing::info!("Default config written to {:?}", path);
    Ok(())
}
