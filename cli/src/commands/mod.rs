//! # FileServer Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module aggregates the command groups that comprise the fileserver
//! CLI. It serves as the central point for importing and re-exporting command
//! modules to make them accessible to the main application entry point
//! (`main.rs`).
//!
//! ## Command Groups
//!
//! - `daemon`: systemd unit generation and service lifecycle control
//!   (selected by `-c start` / `-c stop`)
//! - `serve`: the foreground HTTP static file server (the default when no
//!   `-c` flag is given)
//!
//! Each command group defines a handler function that receives the immutable
//! `Config` and implements the command's functionality.
//!

/// Command group for installing, starting, and stopping the background
/// service: unit-file generation plus systemctl sequencing.
pub mod daemon;
/// Command group for the foreground static HTTP file server.
pub mod serve;
