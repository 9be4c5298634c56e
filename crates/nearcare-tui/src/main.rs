//! `nearcare-tui` — interactive facility locator for the terminal.
//!
//! Built on [ratatui](https://ratatui.rs) with the session state
//! machine from `nearcare-core`. Two screens, navigable via number
//! keys: a searchable distance-ranked facility list and a coordinate
//! map with markers.
//!
//! Logs are written to a file (default `/tmp/nearcare-tui.log`) to
//! avoid corrupting the terminal UI. Configuration is loaded and
//! validated before the terminal is entered, so a bad config fails
//! fast with a readable error.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use nearcare_core::{LocatorService, LocatorSession};

use crate::app::App;

/// Interactive terminal UI for finding nearby medical facilities.
#[derive(Parser, Debug)]
#[command(name = "nearcare-tui", version, about)]
struct Cli {
    /// Config file path (defaults to the platform config dir)
    #[arg(long, env = "NEARCARE_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/nearcare-tui.log)
    #[arg(long, default_value = "/tmp/nearcare-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nearcare_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("nearcare-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!("starting nearcare-tui");

    // Load and validate configuration before touching the terminal, so
    // a bad file fails fast with a readable error instead of a torn
    // screen.
    let config = nearcare_config::load_config_from(cli.config.as_deref())?;
    let directory = nearcare_config::directory(&config)?;
    let settings = nearcare_config::locator_settings(&config)?;
    let map_defaults = nearcare_config::map_defaults(&config)?;

    let provider = settings.build_provider()?;
    let service = LocatorService::new(provider, directory.clone());
    let session = match map_defaults.focus {
        Some(focus) => LocatorSession::with_focus(directory, focus),
        None => LocatorSession::new(directory),
    };

    let mut app = App::new(session, service, map_defaults);
    app.run().await?;

    Ok(())
}
