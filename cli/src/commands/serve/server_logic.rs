//! # FileServer HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module implements the core HTTP server functionality for foreground
//! serving. Path resolution, content types, 404s, traversal protection, and
//! range requests are all delegated to tower-http's `ServeDir`; this module
//! adds only the access-log middleware, the startup banner, and graceful
//! shutdown handling.
//!
//! ## Architecture
//!
//! The server implementation uses Axum and follows these steps:
//! 1. Build the Axum router: `ServeDir` scoped to the serving directory,
//!    wrapped by the access-log and trace middleware
//! 2. Bind a listener on all interfaces at the configured port
//! 3. Serve with connect-info so the middleware can read peer addresses
//! 4. Run until Ctrl+C or SIGTERM triggers graceful shutdown
//!
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use axum::{middleware, Router};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use super::access_log;

/// # Run HTTP Server (`run_server`)
///
/// Initializes and starts the main Axum HTTP server according to the provided
/// configuration, blocking until shutdown.
///
/// ## Process:
/// 1. Creates the application router via `create_app`.
/// 2. Prints the startup banner (serving directory, URL, bind address).
/// 3. Binds a `TcpListener` on `0.0.0.0:<port>`, exactly the configured
///    port: the generated unit file reproduces it and the two must not
///    drift apart.
/// 4. Serves the application with connect-info so each request carries its
///    peer address, and with graceful shutdown on Ctrl+C / SIGTERM.
///
/// ## Arguments
///
/// * `config`: The effective configuration (directory already resolved).
///
/// ## Errors
///
/// Returns an `Err` if the listener cannot bind (e.g. the port is taken or
/// privileged) or the server encounters a fatal error while running.
pub async fn run_server(config: &Config) -> Result<()> {
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port);
    let app = create_app(&config.directory);

    // Display server information to the user upon startup.
    println!("\n=================================================================");
    println!("📂 Serving files from: {}", config.directory.display());
    println!("🌐 Local URL:          http://localhost:{}", config.port);
    println!("⚙️  Binding to address: {}", addr);
    println!("=================================================================\n");

    info!(
        "Starting server on {} for directory {}",
        addr,
        config.directory.display()
    );
    println!("Server starting! Press Ctrl+C to stop.");

    // Bind the TCP listener to the configured socket address.
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    // Serve with connect-info so the access-log middleware can read the
    // peer address from request extensions.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Create Axum Application (`create_app`)
///
/// Constructs the Axum `Router`: a `ServeDir` service handling every request
/// path, layered with the access-log middleware and HTTP tracing. Requests
/// for non-existent files get `ServeDir`'s own 404 response.
fn create_app(directory: &Path) -> Router {
    // Trace layer for debug-level request/response logging; the user-facing
    // access log is the middleware's stdout line.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default())
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    // Static file service scoped to the serving directory root.
    let serve_dir_service = ServeDir::new(directory);

    Router::new()
        // Every request path falls through to the static file service.
        .fallback_service(serve_dir_service)
        // Access log wraps the file service; trace wraps both.
        .layer(middleware::from_fn(access_log::log_request))
        .layer(trace_layer)
}

/// # Handle Shutdown Signal (`shutdown_signal`)
///
/// Creates a future that resolves when a shutdown signal (Ctrl+C, or SIGTERM
/// on Unix) is received. Used by `axum::serve`'s `with_graceful_shutdown` so
/// the server stops accepting new connections and finishes in-flight
/// requests before exiting.
async fn shutdown_signal() {
    // Future that completes when Ctrl+C is pressed.
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, initiating graceful shutdown...");
    };

    // Future that completes when SIGTERM is received (Unix-specific).
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                // Keep the future pending indefinitely if the handler fails.
                std::future::pending::<()>().await;
            }
        }
    };

    // On non-Unix platforms, SIGTERM handling is not applicable.
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either Ctrl+C or SIGTERM to occur.
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// --- Unit Tests ---
