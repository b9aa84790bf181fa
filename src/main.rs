//! siftboard: terminal dashboard for a complaint triage backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use siftboard::api::BackendClient;
use siftboard::config::{self, TuiPreferences};
use siftboard::session::{FileStore, MemoryStore, SharedStore};
use siftboard::tasks::TaskRunner;
use siftboard::tui::{self, App, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "siftboard")]
#[command(version)]
#[command(about = "Terminal dashboard for a complaint triage backend", long_about = None)]
struct Cli {
    /// Base URL of the analysis backend
    #[arg(long, env = "SIFTBOARD_BACKEND_URL")]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme: "dark" or "light"
    #[arg(long)]
    theme: Option<String>,

    /// Write logs to this file (logs are discarded otherwise; the
    /// dashboard owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Persist session state to this file instead of keeping it in memory
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential logging
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration after merging defaults, file, and flags
    Show,
    /// Print the discovered config file path, if any
    Path,
    /// Print a JSON Schema for the config file format
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let (mut app_config, loaded_from) = config::load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.backend_url {
        app_config.backend.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        app_config.backend.timeout_secs = timeout;
    }
    if let Some(theme) = &cli.theme {
        app_config.tui.theme = theme.clone();
    }
    app_config.validate()?;

    if let Some(command) = cli.command {
        return match command {
            Commands::Config { action } => match action {
                ConfigAction::Show => {
                    let yaml = serde_yaml::to_string(&app_config)?;
                    print!("{yaml}");
                    Ok(())
                }
                ConfigAction::Path => {
                    match config::discover_config_file(cli.config.as_deref()) {
                        Some(path) => println!("{}", path.display()),
                        None => println!("(none found, using defaults)"),
                    }
                    Ok(())
                }
                ConfigAction::Schema => {
                    println!("{}", config::generate_json_schema());
                    Ok(())
                }
            },
        };
    }

    if let Some(path) = &loaded_from {
        tracing::info!("loaded configuration from {}", path.display());
    }

    // Theme precedence: explicit flag or config file, then saved
    // preference, then dark.
    let theme = if cli.theme.is_some() || loaded_from.is_some() {
        Theme::from_name(&app_config.tui.theme)
    } else {
        Theme::from_name(&TuiPreferences::load().theme)
    };
    tui::set_theme(theme);

    let client = BackendClient::new(app_config.backend_config())
        .context("failed to build the backend client")?;
    tracing::info!("backend: {}", client.base_url());

    let store: SharedStore = match &cli.session_file {
        Some(path) => Arc::new(FileStore::open(path)),
        None => Arc::new(MemoryStore::new()),
    };

    let (runner, outcomes) = TaskRunner::new(client);
    let mut app = App::new(runner, store);
    tui::run_tui(&mut app, &outcomes).context("terminal error")?;

    Ok(())
}

/// Route logs to the given file or discard them; the TUI owns stdout and
/// stderr while it runs.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
    );

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::sink),
                )
                .init();
        }
    }
    Ok(())
}
