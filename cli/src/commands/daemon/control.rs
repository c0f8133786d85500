//! # FileServer Service Controller
//!
//! File: cli/src/commands/daemon/control.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! Drives the host's service manager (`systemctl`) through the two composite
//! operations:
//! - **Bring up**: `start`, `enable`, `status` (install-and-run plus a
//!   status report)
//! - **Tear down**: `disable`, `stop`
//!
//! Each operation is an explicit ordered list of `ControlStep` values. Steps
//! run strictly sequentially as subprocesses with inherited stdout/stderr;
//! each invocation blocks until that subprocess exits. A non-success exit
//! status stops the sequence (later steps never run) and the returned
//! error names the step that failed along with its exit status. Nothing is
//! retried and nothing is rolled back.
//!
use crate::core::error::{FileserverError, Result};
use anyhow::{anyhow, Context};
use std::process::{Command, Stdio};
use tracing::{info, warn};

use super::unit::UNIT_FILE_NAME;

/// The service manager executable invoked for every step.
pub const SERVICE_MANAGER: &str = "systemctl";

/// One subprocess invocation in a composite control sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlStep {
    /// Program to invoke (always `systemctl` in production sequences).
    pub program: String,
    /// Arguments, e.g. `["start", "fileserver.service"]`.
    pub args: Vec<String>,
}

impl ControlStep {
    /// A `systemctl <subcommand> fileserver.service` step.
    fn manager(subcommand: &str) -> Self {
        Self {
            program: SERVICE_MANAGER.to_string(),
            args: vec![subcommand.to_string(), UNIT_FILE_NAME.to_string()],
        }
    }

    /// Human-readable rendition of the invocation, used in logs and errors.
    pub fn describe(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// The bring-up sequence: start the unit, enable it at boot, query status.
pub fn bring_up_steps() -> Vec<ControlStep> {
    vec![
        ControlStep::manager("start"),
        ControlStep::manager("enable"),
        ControlStep::manager("status"),
    ]
}

/// The tear-down sequence: disable the unit at boot, stop it.
pub fn tear_down_steps() -> Vec<ControlStep> {
    vec![ControlStep::manager("disable"), ControlStep::manager("stop")]
}

/// # Run Control Steps (`run_steps`)
///
/// Executes the steps in order. Each subprocess inherits this process's
/// stdout and stderr, so the service manager's own output streams straight
/// through to the operator. The first step that exits non-success aborts the
/// sequence with a `FileserverError::ServiceControl` naming that step.
///
/// ## Errors
///
/// - Failure to spawn a step (e.g. the service manager is not installed)
///   surfaces as an execution error with context.
/// - A step exiting non-success surfaces as `ServiceControl { step, status }`;
///   steps after it never run.
pub fn run_steps(steps: &[ControlStep]) -> Result<()> {
    for step in steps {
        info!("Running control step: {}", step.describe());

        let status = Command::new(&step.program)
            .args(&step.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute '{}'", step.describe()))?;

        if !status.success() {
            warn!(
                "Control step '{}' reported failure ({}); aborting sequence",
                step.describe(),
                status
            );
            return Err(anyhow!(FileserverError::ServiceControl {
                step: step.describe(),
                status: status.to_string(),
            }));
        }
    }

    Ok(())
}
