//! # FileServer Daemon Management
//!
//! File: cli/src/commands/daemon/mod.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module implements the two composite daemon operations selected by the
//! `-c` flag:
//! - **start**: render the systemd unit file for the current configuration,
//!   install it under the systemd unit directory, then bring the service up
//!   (start, enable at boot, report status)
//! - **stop**: tear the service down (disable at boot, stop)
//!
//! ## Architecture
//!
//! The module is organized into two components:
//! - `unit.rs`: Service unit template rendering and installation
//! - `control.rs`: Ordered systemctl step sequences and their runner
//!
//! There is no rollback: a failure partway through a sequence leaves the
//! system in that partial state, and the error names the step that failed.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

/// Ordered systemctl step sequences and the subprocess runner.
pub mod control;

/// Service unit rendering and installation.
pub mod unit;

/// # Handle Start Command (`handle_start`)
///
/// Installs the service unit for the current configuration, then runs the
/// bring-up sequence. Unit-file errors abort before any systemctl step runs;
/// a failing systemctl step aborts the remaining steps. The final success
/// line prints only when every step succeeded.
pub async fn handle_start(config: &Config) -> Result<()> {
    info!("Handling start command with config: {:?}", config);

    let unit_path = unit::write_unit_file(config, Path::new(unit::SYSTEMD_UNIT_DIR))?;
    println!("Installed service unit at {}", unit_path.display());

    control::run_steps(&control::bring_up_steps())?;

    println!("start fileserver daemon success.");
    Ok(())
}

/// # Handle Stop Command (`handle_stop`)
///
/// Runs the tear-down sequence: disable at boot, then stop. Same early-stop
/// policy as bring-up; the success line prints only when both steps succeed.
pub async fn handle_stop(config: &Config) -> Result<()> {
    info!("Handling stop command with config: {:?}", config);

    control::run_steps(&control::tear_down_steps())?;

    println!("stop fileserver daemon success.");
    Ok(())
}
