//! # FileServer CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module provides shared utility functions and re-exports common crates
//! used across multiple integration test files. This avoids code duplication
//! in the test suite.
//!
//! Integration tests are located in the `cli/tests/` directory and each `.rs`
//! file in that directory (that isn't a module like this one) is compiled as
//! a separate test crate linked against the main `fileserver` binary crate.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

// Re-export common crates/modules needed by multiple test files
pub use assert_cmd::Command;

/// # Get FileServer Command (`fileserver_cmd`)
///
/// Helper function to create an `assert_cmd::Command` instance pointing to
/// the compiled `fileserver` binary target for the current test run.
///
/// ## Panics
/// Panics if the `fileserver` binary cannot be found via `Command::cargo_bin`.
pub fn fileserver_cmd() -> Command {
    Command::cargo_bin("fileserver").expect("Failed to find fileserver binary for testing")
}
