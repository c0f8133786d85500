//! # FileServer Configuration System
//!
//! File: cli/src/core/config.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! This module handles command-line parsing and configuration loading,
//! merging, and validation for the fileserver application. It combines
//! settings from:
//! 1. Command-line arguments (highest priority)
//! 2. Local configuration file `.fileserver.toml` (if present in the served directory)
//! 3. Default values (lowest priority)
//!
//! ## Architecture
//!
//! The configuration system follows these steps:
//! 1. Parse command-line arguments into `CliArgs`
//! 2. Load configuration from file (if present)
//! 3. Merge settings (explicitly set CLI args override file settings)
//! 4. Produce a single immutable `Config` for the process lifetime
//!
//! The `Config` struct is constructed exactly once at startup and passed by
//! reference to each component; no component mutates it afterwards. It also
//! knows how to reproduce its own invocation flags (`runtime_flags`), which
//! is what the service unit generator interpolates into the `ExecStart` line.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! # Server configuration
//! port = 8080
//! mode = "release"
//! directory = "public"
//! ```
//!
//! Loading and merging configuration:
//!
//! ```rust
//! // Parse CLI args
//! let args = CliArgs::parse();
//!
//! // Load and merge config
//! let config = load_and_merge_config(args)?;
//!
//! // Use the config
//! println!("Serving directory: {}", config.directory.display());
//! println!("Listening on port: {}", config.port);
//! ```
//!
use crate::core::error::{FileserverError, Result};
use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The expected name for the optional configuration file.
const CONFIG_FILE_NAME: &str = ".fileserver.toml";

/// # Command-Line Arguments (`CliArgs`)
///
/// Defines the four flags accepted by the `fileserver` binary, parsed using
/// `clap`. The same flags are reconstructed verbatim into the generated
/// service unit so the daemonized invocation reproduces the current one.
#[derive(Parser, Debug)]
#[command(
    name = "fileserver",
    about = "🦀 fileserver ⚙️: Static Directory Hosting & Service Management",
    long_about = "Serve a local directory over HTTP, or install the server as a systemd\n\
                  unit with start/stop lifecycle control.",
    version
)]
pub struct CliArgs {
    /// Sets the network port the server will listen on.
    #[arg(short = 'p', long = "port", default_value_t = 1070)]
    pub port: u16,

    /// Selects the run mode. `debug` enables debug-level logging;
    /// `release` (the default) keeps logging quiet.
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Release)]
    pub mode: Mode,

    /// Specifies the root directory from which files will be served.
    /// If not provided, defaults to the current working directory (`.`).
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub directory: PathBuf,

    /// Daemon lifecycle command. `start` writes the systemd unit and brings
    /// the daemon up; `stop` tears it down. When absent, the server runs in
    /// the foreground.
    #[arg(short = 'c', long = "command", value_enum)]
    pub command: Option<DaemonCommand>,
}

/// Run mode for the server process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Development mode with verbose logging.
    Debug,
    /// Production mode (default).
    Release,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Debug => write!(f, "debug"),
            Mode::Release => write!(f, "release"),
        }
    }
}

/// Daemon lifecycle command selected by the `-c` flag.
/// Any other value is rejected by clap at parse time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DaemonCommand {
    /// Install the unit file, then start/enable/status the daemon.
    Start,
    /// Disable the daemon at boot, then stop it.
    Stop,
}

/// # Effective Configuration (`Config`)
///
/// Holds the final, consolidated settings after merging command-line
/// arguments and any settings loaded from a `.fileserver.toml` file.
/// Immutable once constructed; lifecycle equals the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// The network port the server will listen on.
    pub port: u16,

    /// The run mode (`debug` or `release`).
    pub mode: Mode,

    /// The directory being served (resolved for foreground serving,
    /// passed through verbatim into the unit file for daemon commands).
    pub directory: PathBuf,

    /// The daemon lifecycle command, if any.
    pub command: Option<DaemonCommand>,
}

/// # Configuration from File (`FileConfig`)
///
/// A helper struct used solely for deserializing the `.fileserver.toml` file.
/// All fields are optional so users can specify only the settings they wish
/// to override. The file is only ever read, never written.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    mode: Option<Mode>,
    directory: Option<String>,
}

/// # Load and Merge Configuration (`load_and_merge_config`)
///
/// Determines the final configuration for this process run. It starts with
/// the command-line arguments, then fills in settings from a
/// `.fileserver.toml` file found in the target directory, but only for
/// flags the user left at their defaults, so an explicit flag always wins.
///
/// ## Arguments
///
/// * `args`: The parsed `CliArgs` struct.
///
/// ## Returns
///
/// * `Result<Config>`: The final `Config`, or an error if the configuration
///   file exists but cannot be read or parsed.
pub fn load_and_merge_config(args: CliArgs) -> Result<Config> {
    let mut effective_config = Config::from_args(&args);
    let cli_defaults = CliArgs::parse_from(["fileserver"]); // Defaults for comparison.

    // Resolve the potential location of the config file based on the input directory.
    let config_search_dir = if args.directory.is_absolute() {
        args.directory.clone()
    } else {
        // If relative, join with the current working directory.
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(&args.directory)
    };

    debug!("Looking for config file in: {}", config_search_dir.display());

    if let Some(file_config) = load_config_from_dir(&config_search_dir)? {
        info!(
            "Loaded settings from {}",
            config_search_dir.join(CONFIG_FILE_NAME).display()
        );

        // Port: use the file's value only if the CLI arg was left at its default.
        if args.port == cli_defaults.port {
            if let Some(port) = file_config.port {
                effective_config.port = port;
            }
        }
        // Mode: same rule.
        if args.mode == cli_defaults.mode {
            if let Some(mode) = file_config.mode {
                effective_config.mode = mode;
            }
        }
        // Directory: same rule. A relative path in the file is resolved
        // against the directory containing the config file itself.
        if args.directory == cli_defaults.directory {
            if let Some(ref dir) = file_config.directory {
                let mut resolved = PathBuf::from(dir);
                if resolved.is_relative() {
                    resolved = config_search_dir.join(resolved);
                }
                effective_config.directory = resolved;
            }
        }
    } else {
        debug!("No config file found or loaded. Using arguments.");
    }

    Ok(effective_config)
}

/// # Load Configuration from Directory (`load_config_from_dir`)
///
/// Attempts to find, read, and parse a `.fileserver.toml` configuration file
/// within the specified directory.
///
/// ## Returns
///
/// * `Ok(Some(file_config))` if the file was found and parsed successfully.
/// * `Ok(None)` if the file was not found.
/// * `Err(_)` if the file was found but could not be read or parsed.
fn load_config_from_dir(search_dir: &Path) -> Result<Option<FileConfig>> {
    let config_path = search_dir.join(CONFIG_FILE_NAME);

    // Check if the configuration file exists and is actually a file.
    if !config_path.exists() || !config_path.is_file() {
        debug!("No config file found at {}", config_path.display());
        return Ok(None); // No config file found is not an error.
    }

    info!("Loading configuration from {}", config_path.display());

    // Read the file content.
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    // Parse the TOML content.
    let file_config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(file_config))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1070,
            mode: Mode::Release,
            directory: PathBuf::from("."),
            command: None,
        }
    }
}

impl Config {
    /// # Create Configuration from Arguments (`from_args`)
    ///
    /// Creates a `Config` instance based *only* on the provided command-line
    /// arguments. This serves as the starting point before potentially
    /// merging settings from a configuration file.
    fn from_args(args: &CliArgs) -> Self {
        Self {
            port: args.port,
            mode: args.mode,
            directory: args.directory.clone(),
            command: args.command,
        }
    }

    /// # Reconstruct Invocation Flags (`runtime_flags`)
    ///
    /// Produces the command-line string needed to reproduce this
    /// configuration: `-m <mode> -p <port> -d <directory>`. The service unit
    /// generator interpolates this string into the `ExecStart` line, so the
    /// daemonized process serves the same directory on the same port as the
    /// invocation that installed it.
    pub fn runtime_flags(&self) -> String {
        format!(
            "-m {} -p {} -d {}",
            self.mode,
            self.port,
            self.directory.display()
        )
    }

    /// # Resolve and Validate Directory Path (`resolve_directory`)
    ///
    /// Ensures the `directory` field points to a valid, accessible, absolute
    /// directory path on the filesystem. Called before foreground serving;
    /// daemon commands pass the directory through verbatim instead, since the
    /// unit file must reproduce the flag exactly as given.
    ///
    /// ## Steps:
    /// 1. If the current `directory` path is relative, it's joined with the
    ///    current working directory to make it absolute.
    /// 2. The absolute path is canonicalized using `tokio::fs::canonicalize`
    ///    to resolve symlinks and normalize `.` and `..` components.
    /// 3. The canonical path is verified to exist and to be a directory.
    ///
    /// ## Errors
    ///
    /// Returns an error if the path cannot be canonicalized, metadata cannot
    /// be retrieved, or the path is not a directory.
    pub async fn resolve_directory(&mut self) -> Result<()> {
        let dir_path = &self.directory;

        // Ensure the path is absolute.
        let absolute_path = if dir_path.is_absolute() {
            dir_path.clone()
        } else {
            let current_dir =
                env::current_dir().context("Failed to get current working directory")?;
            current_dir.join(dir_path)
        };

        // Canonicalize the path asynchronously to resolve symlinks, ., .. etc.
        match tokio::fs::canonicalize(&absolute_path).await {
            Ok(canonical_path) => {
                match tokio::fs::metadata(&canonical_path).await {
                    Ok(metadata) => {
                        if !metadata.is_dir() {
                            return Err(anyhow!(FileserverError::Config(format!(
                                "Path is not a directory: {}",
                                canonical_path.display()
                            ))));
                        }
                        self.directory = canonical_path;
                        debug!("Resolved serving directory to: {}", self.directory.display());
                    }
                    Err(e) => {
                        anyhow::bail!(
                            "Failed to get metadata for path '{}': {}",
                            canonical_path.display(),
                            e
                        );
                    }
                }
            }
            Err(e) => {
                warn!("Could not canonicalize '{}'", absolute_path.display());
                anyhow::bail!(
                    "Directory '{}' could not be found or accessed: {}",
                    absolute_path.display(),
                    e
                );
            }
        }

        Ok(())
    }
}

// --- Unit Tests ---

/// # Unit Tests for Configuration
///
/// Tests for command-line translation, file loading, merge precedence, and
/// directory resolution.
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 1070);
        assert_eq!(config.mode, Mode::Release);
        assert_eq!(config.directory, PathBuf::from("."));
        assert!(config.command.is_none());
    }

    /// Verifies that `Config::from_args` translates `CliArgs` field-for-field.
    #[test]
    fn test_from_args() {
        let args = CliArgs {
            port: 8080,
            mode: Mode::Debug,
            directory: PathBuf::from("/srv/www"),
            command: Some(DaemonCommand::Start),
        };

        let config = Config::from_args(&args);

        assert_eq!(config.port, 8080);
        assert_eq!(config.mode, Mode::Debug);
        assert_eq!(config.directory, PathBuf::from("/srv/www"));
        assert_eq!(config.command, Some(DaemonCommand::Start));
    }

    /// The reconstructed flag string must reproduce the invocation exactly;
    /// this is what ends up on the unit file's ExecStart line.
    #[test]
    fn test_runtime_flags_format() {
        let config = Config {
            port: 8080,
            mode: Mode::Release,
            directory: PathBuf::from("/srv/www"),
            command: Some(DaemonCommand::Start),
        };
        assert_eq!(config.runtime_flags(), "-m release -p 8080 -d /srv/www");
    }

    #[test]
    fn test_runtime_flags_debug_mode() {
        let config = Config {
            port: 1070,
            mode: Mode::Debug,
            directory: PathBuf::from("."),
            command: None,
        };
        assert_eq!(config.runtime_flags(), "-m debug -p 1070 -d .");
    }

    #[test]
    fn test_mode_display_matches_flag_values() {
        // Display output must round-trip through clap's value parser.
        assert_eq!(Mode::Debug.to_string(), "debug");
        assert_eq!(Mode::Release.to_string(), "release");
    }

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::parse_from(["fileserver"]);
        assert_eq!(args.port, 1070);
        assert_eq!(args.mode, Mode::Release);
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let args =
            CliArgs::parse_from(["fileserver", "-p", "8080", "-m", "debug", "-d", "/tmp", "-c", "start"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.mode, Mode::Debug);
        assert_eq!(args.directory, PathBuf::from("/tmp"));
        assert_eq!(args.command, Some(DaemonCommand::Start));
    }

    /// `load_config_from_dir` returns `Ok(None)` when no file is present.
    #[test]
    fn test_load_config_from_dir_no_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let result = load_config_from_dir(temp_dir.path())?;
        assert!(result.is_none());
        Ok(())
    }

    /// A valid config file is read and parsed, including the mode enum.
    #[test]
    fn test_load_config_from_dir_with_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_content = r#"
        port = 9090
        mode = "debug"
        directory = "public"
        "#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content)?;

        let file_config = load_config_from_dir(temp_dir.path())?.unwrap();
        assert_eq!(file_config.port, Some(9090));
        assert_eq!(file_config.mode, Some(Mode::Debug));
        assert_eq!(file_config.directory.as_deref(), Some("public"));

        Ok(())
    }

    /// An unknown key in the config file is a parse error, not a silent skip.
    #[test]
    fn test_load_config_rejects_unknown_keys() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "port = 9090\nhost = \"0.0.0.0\"\n",
        )?;

        let result = load_config_from_dir(temp_dir.path());
        assert!(result.is_err());
        Ok(())
    }

    /// File values fill in flags left at their defaults.
    #[test]
    fn test_load_and_merge_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_content = r#"
        port = 9090
        mode = "debug"
        "#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content)?;

        // Directory is explicit (points at the temp dir); port and mode are defaults.
        let args = CliArgs::parse_from([
            "fileserver",
            "-d",
            temp_dir.path().to_str().unwrap(),
        ]);
        let config = load_and_merge_config(args)?;

        assert_eq!(config.port, 9090);
        assert_eq!(config.mode, Mode::Debug);
        assert_eq!(config.directory, temp_dir.path().to_path_buf());

        Ok(())
    }

    /// Explicitly set CLI flags always win over file values.
    #[test]
    fn test_load_and_merge_cli_overrides_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_content = r#"
        port = 9090
        mode = "debug"
        "#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content)?;

        let args = CliArgs::parse_from([
            "fileserver",
            "-p",
            "8080",
            "-m",
            "release",
            "-d",
            temp_dir.path().to_str().unwrap(),
        ]);
        let config = load_and_merge_config(args)?;

        assert_eq!(config.port, 8080);
        assert_eq!(config.mode, Mode::Release);

        Ok(())
    }

    /// Without a config file the arguments pass through untouched.
    #[test]
    fn test_load_and_merge_args_only() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let args = CliArgs::parse_from([
            "fileserver",
            "-p",
            "8080",
            "-d",
            temp_dir.path().to_str().unwrap(),
        ]);
        let config = load_and_merge_config(args)?;

        assert_eq!(config.port, 8080);
        assert_eq!(config.directory, temp_dir.path().to_path_buf());
        assert_eq!(config.mode, Mode::Release);

        Ok(())
    }

    /// `resolve_directory` canonicalizes an existing path.
    #[tokio::test]
    async fn test_resolve_directory_existing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut config = Config {
            directory: temp_dir.path().to_path_buf(),
            ..Config::default()
        };

        config.resolve_directory().await?;

        assert_eq!(config.directory, fs::canonicalize(temp_dir.path())?);
        Ok(())
    }

    /// `resolve_directory` errors for a missing path.
    #[tokio::test]
    async fn test_resolve_directory_nonexistent() {
        let mut config = Config {
            directory: PathBuf::from("/path/that/definitely/does/not/exist"),
            ..Config::default()
        };

        let result = config.resolve_directory().await;
        assert!(result.is_err());
    }
}
