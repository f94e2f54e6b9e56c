use clap::Parser;
use gtk4::prelude::*;
use gtk4::Application;
use log::{error, info, warn};
use speedo::config::AppConfig;
use speedo::ui::{build_main_window, LaunchOptions};
use std::path::PathBuf;

const APP_ID: &str = "io.github.speedo";

/// speedo - speedometer and tachometer dashboard with a synthetic generator
#[derive(Parser, Debug, Clone)]
#[command(name = "speedo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Launch in fullscreen mode
    #[arg(short = 'f', long = "fullscreen")]
    fullscreen: bool,

    /// Force normal windowed mode (overrides fullscreen from the command line or config)
    #[arg(short = 'w', long = "windowed")]
    windowed: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Config file to load instead of the default location
    #[arg(value_name = "CONFIG_FILE")]
    config_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting speedo v{}", env!("CARGO_PKG_VERSION"));

    let app_config = load_config(cli.config_file.as_ref());
    let options = LaunchOptions {
        fullscreen: cli.fullscreen,
        windowed: cli.windowed,
    };

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        info!("Building UI");
        match build_main_window(app, &app_config, options) {
            Ok(window) => window.present(),
            Err(e) => {
                error!("Failed to start: {:#}", e);
                app.quit();
            }
        }
    });

    // Arguments were already parsed by clap
    app.run_with_args(&["speedo"]);
}

/// Config file from the command line, else the default location, else defaults.
fn load_config(path: Option<&PathBuf>) -> AppConfig {
    if let Some(path) = path {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load config file '{}': {}", path.display(), e);
            }
        }
    }

    match AppConfig::load() {
        Ok(config) => {
            info!("Loaded configuration from disk");
            config
        }
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}
