//! # FileServer Main Entry Point
//!
//! File: cli/src/main.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This file serves as the main entry point for the fileserver CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on the selected mode
//! - Routing execution to the daemon or serve command handlers
//!
//! ## Architecture
//!
//! The application follows a small dispatch structure:
//! - The four flags (`-p`, `-m`, `-d`, `-c`) are parsed into `CliArgs`
//! - Flags are merged with an optional `.fileserver.toml` file into an
//!   immutable `Config` constructed exactly once at startup
//! - The `-c` flag selects one of three states for the whole process run:
//!   `start` (install and bring up the daemon), `stop` (tear it down), or
//!   absent (serve the directory in the foreground)
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! Basic fileserver usage:
//!
//! ```bash
//! # Serve the current directory on the default port
//! fileserver
//!
//! # Serve a specific directory on port 8080
//! fileserver -p 8080 -d /srv/www
//!
//! # Install and start the systemd daemon for that directory
//! fileserver -p 8080 -d /srv/www -c start
//!
//! # Stop the daemon and remove it from boot
//! fileserver -c stop
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on the mode flag
//! 3. Build the effective configuration (CLI > file > defaults)
//! 4. Route to the appropriate command handler
//! 5. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Handles specific command logic (serve, daemon).
mod core; // Core infrastructure (errors, configuration).

use crate::core::config::{self, CliArgs, DaemonCommand, Mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Use anyhow::Result directly
    let args = CliArgs::parse();

    // Debug mode turns on debug-level logging; release mode stays quiet
    // unless RUST_LOG overrides the filter.
    let log_level = match args.mode {
        Mode::Debug => "debug",
        Mode::Release => "warn",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", args);

    // Build the single immutable configuration for this process run.
    let config = config::load_and_merge_config(args)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let command_result = match config.command {
        Some(DaemonCommand::Start) => commands::daemon::handle_start(&config).await,
        Some(DaemonCommand::Stop) => commands::daemon::handle_stop(&config).await,
        None => commands::serve::handle_serve(config).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
