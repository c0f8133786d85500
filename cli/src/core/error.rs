//! # FileServer Error Types
//!
//! File: cli/src/core/error.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used
//! throughout the fileserver application. It provides a consistent approach
//! to error management with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FileserverError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover the program's domains:
//! - Configuration errors
//! - Filesystem errors during unit-file generation
//! - Template rendering errors
//! - Service-manager subprocess failures
//!
//! ## Examples
//!
//! Using the error system:
//!
//! ```rust
//! // Return a specific error type
//! if !path.is_dir() {
//!     return Err(FileserverError::Config(format!("Not a directory: {}", path.display())))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
//! Every fallible operation returns `Result`; only the entry point decides
//! whether an error terminates the process.
//!
use thiserror::Error;

/// Custom error type for the fileserver application.
#[derive(Error, Debug)]
pub enum FileserverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Service control step '{step}' failed ({status})")]
    ServiceControl { step: String, status: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
