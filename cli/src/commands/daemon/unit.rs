//! # FileServer Service Unit Generation
//!
//! File: cli/src/commands/daemon/unit.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! Renders the systemd service unit document for the current configuration
//! and installs it at the well-known unit path. The template is fixed apart
//! from one substitution point: the command-line flags needed to reproduce
//! the current invocation, interpolated into the `ExecStart` line.
//!
//! The unit file, if present, is always fully replaced: removed first, then
//! created and written. It is never read back by this program. Rendering and
//! every filesystem step return explicit errors; the entry point decides
//! whether a failure terminates the process.
//!
use crate::core::config::Config;
use crate::core::error::{FileserverError, Result};
use anyhow::{anyhow, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info};

/// Name of the generated unit, as systemd knows it.
pub const UNIT_FILE_NAME: &str = "fileserver.service";

/// Directory systemd loads packaged unit files from. The generator takes the
/// directory as a parameter so tests can point it at a scratch location;
/// `handle_start` passes this constant.
pub const SYSTEMD_UNIT_DIR: &str = "/usr/lib/systemd/system";

/// The unit document. `flags` is the only variable field.
const UNIT_TEMPLATE: &str = "\
[Unit]
Description=Files server daemon

[Service]
ExecStart=/usr/bin/fileserver {{ flags }}
ExecReload=/bin/kill -HUP $MAINPID
Type=simple
KillMode=process
Restart=on-failure
RestartSec=42s

[Install]
WantedBy=multi-user.target
";

/// # Render Service Unit (`render_unit`)
///
/// Renders the unit template with the configuration's reconstructed flag
/// string. Deterministic: the same configuration always yields byte-identical
/// output.
///
/// ## Errors
///
/// Returns a `FileserverError::Template` if Tera fails to render.
pub fn render_unit(config: &Config) -> Result<String> {
    let mut context = tera::Context::new();
    context.insert("flags", &config.runtime_flags());

    // Autoescape off: this is a plain-text unit file, not HTML.
    let rendered = Tera::one_off(UNIT_TEMPLATE, &context, false)
        .map_err(|e| anyhow!(FileserverError::Template { source: e }))
        .context("Failed to render service unit template")?;

    debug!("Rendered service unit:\n{}", rendered);
    Ok(rendered)
}

/// # Install Service Unit (`write_unit_file`)
///
/// Renders the unit document and writes it to `<unit_dir>/fileserver.service`.
/// An existing file at that path is removed before the new one is created, so
/// the result is always a full replacement with no stale content.
///
/// ## Arguments
///
/// * `config`: The configuration whose flags are reproduced into `ExecStart`.
/// * `unit_dir`: The directory to install into (`SYSTEMD_UNIT_DIR` in
///   production; a temporary directory in tests).
///
/// ## Returns
///
/// * `Result<PathBuf>`: The path of the installed unit file.
///
/// ## Errors
///
/// Fails if the template does not render, the existing file cannot be
/// removed, the file cannot be created, or the write fails. There is no
/// partial-write recovery; the caller aborts the whole start operation.
pub fn write_unit_file(config: &Config, unit_dir: &Path) -> Result<PathBuf> {
    let rendered = render_unit(config)?;
    let unit_path = unit_dir.join(UNIT_FILE_NAME);

    // Remove any previous unit file so the write is a full replacement.
    if unit_path.exists() {
        fs::remove_file(&unit_path)
            .map_err(|e| {
                anyhow!(FileserverError::FileSystem(format!(
                    "Failed to remove existing unit file '{}': {}",
                    unit_path.display(),
                    e
                )))
            })?;
        debug!("Removed previous unit file at {}", unit_path.display());
    }

    let mut file = fs::File::create(&unit_path)
        .with_context(|| format!("Failed to create unit file '{}'", unit_path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write unit file '{}'", unit_path.display()))?;

    info!("Wrote service unit to {}", unit_path.display());
    Ok(unit_path)
}
