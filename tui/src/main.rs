//! Sentiment TUI Entry Point
//!
//! Launches the terminal client for the sentiment service.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (service at http://127.0.0.1:5000)
//! sentiment-tui
//!
//! # Another service
//! sentiment-tui --api-url https://sentiment.example.com
//!
//! # Verbose logging (written to the log file, never the screen)
//! RUST_LOG=debug sentiment-tui
//! ```

use std::fs;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentiment_core::{
    default_config_path, load_config_from_path, ClientConfig, ConfigOverrides, HttpBackend,
};
use sentiment_tui::App;

/// Sentiment TUI - type a sentence, see how it sounds
#[derive(Parser, Debug)]
#[command(name = "sentiment-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the sentiment service (overrides SENTIMENT_API_URL)
    #[arg(short = 'u', long, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "SENTIMENT_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Default log file (`$XDG_CACHE_HOME/sentiment-tui/sentiment-tui.log`)
fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sentiment-tui")
        .join("sentiment-tui.log")
}

/// Initialize logging to a file; stdout belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {path:?}"))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("sentiment_tui=info,sentiment_core=info")
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Overrides given as flags; environment variables are read by the core loader
fn cli_overrides(args: &Args) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::new();
    if let Some(ref url) = args.api_url {
        overrides = overrides.with_api_url(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        overrides = overrides.with_timeout(Duration::from_secs(secs));
    }
    overrides
}

/// Load file + environment configuration, then apply CLI overrides
fn build_config(args: &Args) -> Result<ClientConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;

    cli_overrides(args)
        .apply(&mut config)
        .context("Invalid command-line configuration")?;

    tracing::info!(
        source = %config.source(),
        api_url = %config.api.url,
        "Configuration loaded"
    );
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: sentiment-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        std::process::exit(1);
    }

    let config = build_config(&args)?;
    let backend = HttpBackend::from_config(&config.api).context("Failed to build HTTP client")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(backend, &config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Application error");
    }

    // Propagate any errors
    result
}
