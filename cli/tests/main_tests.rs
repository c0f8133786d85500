//! # FileServer CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This integration test file focuses on verifying the top-level behavior
//! of the `fileserver` command-line interface: standard flags like
//! `--version` and `--help`, and rejection of invalid flag values.
//!

// Declare and use the common module for helpers like `fileserver_cmd()`
mod common;
use common::*;
// Import necessary items directly
use predicates::prelude::*;

/// `--help` succeeds and documents all four flags.
#[test]
fn test_help_lists_all_flags() {
    fileserver_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("--dir"))
        .stdout(predicate::str::contains("--command"));
}

/// `--version` reports the crate version.
#[test]
fn test_version_flag() {
    fileserver_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// A non-numeric port is rejected at parse time.
#[test]
fn test_invalid_port_rejected() {
    fileserver_cmd()
        .args(["-p", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

/// The command flag only admits `start` and `stop`.
#[test]
fn test_invalid_command_rejected() {
    fileserver_cmd()
        .args(["-c", "restart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
