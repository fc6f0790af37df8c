//! `WorkLog` — terminal work log for tracking daily tasks.
//!
//! Stores dated entries (title, minutes spent, optional notes) in a flat
//! file and offers add, search, edit and delete from a keyed menu.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/worklog/config.toml`).
//!
//! ```bash
//! # Default data file under the platform data directory
//! cargo run --bin worklog
//!
//! # Explicit data file
//! cargo run --bin worklog -- --file ./log.csv
//!
//! # Or via environment variable
//! WORKLOG_FILE=./log.csv cargo run --bin worklog
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use worklog::config::{AppConfig, CliArgs};
use worklog::menu::{self, MenuError};
use worklog::store::TaskStore;

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Initialize logging before the menus own the screen (logs go to a
    // file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("worklog starting");

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "worklog exiting with error");
        eprintln!("worklog: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("worklog exiting");
    ExitCode::SUCCESS
}

/// Opens the store and runs the menu loop over stdin/stdout.
fn run(config: &AppConfig) -> Result<(), MenuError> {
    if let Some(parent) = config.data_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(MenuError::Io)?;
        }
    }
    let mut store = TaskStore::open(&config.data_file)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    menu::run(&mut store, config, &mut input, &mut out)
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since the menus own the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("worklog.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
