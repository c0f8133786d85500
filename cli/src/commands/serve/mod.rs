//! # FileServer Static File Server
//!
//! File: cli/src/commands/serve/mod.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module provides the foreground HTTP static file server. It serves
//! files from the configured directory, bound to all interfaces on the
//! configured port, and emits one access-log line to standard output per
//! completed request.
//!
//! ## Architecture
//!
//! The module is organized into two components:
//! - `server_logic.rs`: Core Axum-based HTTP server implementation
//! - `access_log.rs`: Per-request logging middleware and its formatting
//!
//! The main `handle_serve` function serves as the entry point for the
//! command: it validates the serving directory and launches the server,
//! which blocks until the process receives a shutdown signal.
//!
//! ## Examples
//!
//! ```bash
//! # Serve the current directory on the default port
//! fileserver
//!
//! # Serve a specific directory on port 8080 with verbose logging
//! fileserver -m debug -p 8080 -d ./dist
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use tracing::info;

/// Per-request access logging middleware.
pub mod access_log;

/// Contains the core Axum-based HTTP server implementation.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// The entry point for foreground serving, used when no `-c` flag was given.
///
/// It performs the following steps:
/// 1. Resolves and validates the configured serving directory (the path must
///    exist and be a directory).
/// 2. Delegates the actual server execution (binding the port, setting up
///    routes, serving files) to `server_logic::run_server`, which blocks
///    until shutdown.
///
/// ## Arguments
///
/// * `config`: The effective configuration for this process run.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after a clean shutdown, or an `Err` if the
///   directory is invalid or the server fails to start.
pub async fn handle_serve(mut config: Config) -> Result<()> {
    info!("Handling serve command with config: {:?}", config);

    // The serving path must point at a real directory before we bind.
    config.resolve_directory().await?;

    server_logic::run_server(&config).await?;

    Ok(())
}
