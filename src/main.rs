//! Payroll Console - desktop administration client for the payroll backend.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use payroll_console as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use app::api::ApiClient;
use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::ui::{App, SetupApp, SetupWizard};

/// Desktop administration console for the payroll backend.
#[derive(Parser)]
#[command(name = "payroll-console", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Backend base URL, overriding the config file
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

/// Application launch mode.
enum LaunchMode {
    /// Normal operation with valid config.
    Normal(AppConfig),
    /// Setup wizard for first run or invalid config.
    Setup(SetupWizard, Option<String>),
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let loaded = AppConfig::try_load(&config_path);
    let logging = match &loaded {
        ConfigLoadResult::Loaded(config) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let _log_guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            init_stdout_logging(&logging);
            tracing::warn!("File logging disabled: {e:#}");
            None
        }
    };

    tracing::info!("Payroll Console starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);

    let launch_mode = match loaded {
        ConfigLoadResult::Loaded(mut config) => {
            tracing::info!("Config loaded successfully");
            if let Some(server) = cli.server {
                tracing::info!("Server override: {server}");
                config.server.base_url = server;
            }
            LaunchMode::Normal(config)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting setup wizard");
            LaunchMode::Setup(wizard_for(cli.server, config_path.clone()), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            LaunchMode::Setup(wizard_for(cli.server, config_path.clone()), Some(e.to_string()))
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    match launch_mode {
        LaunchMode::Normal(config) => {
            match ApiClient::new(&config.server.base_url, config.server.timeout()) {
                Ok(client) => run_main_app(config, client, rt),
                Err(e) => {
                    tracing::error!("Failed to create HTTP client: {e}");
                    let wizard = SetupWizard::with_config(config, config_path);
                    run_setup_wizard(wizard, Some(e.to_string()), rt)
                }
            }
        }
        LaunchMode::Setup(wizard, error) => run_setup_wizard(wizard, error, rt),
    }
}

fn wizard_for(server: Option<String>, config_path: PathBuf) -> SetupWizard {
    let mut config = AppConfig::default();
    if let Some(server) = server {
        config.server.base_url = server;
    }
    SetupWizard::with_config(config, config_path)
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Set up stdout logging and, when enabled, a daily log file in the data directory.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = if logging.file {
        let dirs = directories::ProjectDirs::from("", "", "payroll-console")
            .context("No home directory to place log files in")?;
        let log_dir = dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::daily(&log_dir, "payroll-console.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(logging))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn init_stdout_logging(logging: &LoggingConfig) {
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter(logging)).try_init();
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Run the setup wizard.
fn run_setup_wizard(
    wizard: SetupWizard,
    initial_error: Option<String>,
    rt: tokio::runtime::Runtime,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Payroll Console - Setup")
            .with_inner_size([600.0, 500.0])
            .with_min_inner_size([500.0, 400.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Payroll Console - Setup",
        options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Ok(Box::new(SetupApp::new(wizard, initial_error, rt)))
        }),
    )
}

/// Run the main application.
fn run_main_app(
    config: AppConfig,
    client: ApiClient,
    rt: tokio::runtime::Runtime,
) -> eframe::Result<()> {
    tracing::info!("Backend: {}", client.base_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Payroll Console")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Payroll Console",
        options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Ok(Box::new(App::new(config, client, rt)))
        }),
    )
}
