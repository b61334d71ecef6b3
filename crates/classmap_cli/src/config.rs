//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Parse flags, falling back to environment variables and `.env` values.
//! - Resolve the run settings handed to `classmap_core`.
//!
//! # Invariants
//! - Precedence is flag > environment > `.env` > built-in default.
//! - The resolved log directory is absolute.

use clap::{Parser, ValueEnum};
use classmap_core::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR: &str = "logs";

/// Deployment profile; selects the default log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Dev => "debug",
            Self::Prod => "info",
        }
    }
}

/// Regroups class attributes into virtual / non-virtual buckets.
#[derive(Parser, Debug)]
#[command(name = "classmap", version)]
pub struct CliArgs {
    /// Class document to read.
    #[arg(env = "CLASSMAP_INPUT", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Where the regrouped document is written.
    #[arg(short, long, env = "CLASSMAP_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Deployment profile.
    #[arg(long = "env", env = "ENV", value_enum, default_value_t = Profile::Dev)]
    pub profile: Profile,

    /// Overrides the profile's log level (trace|debug|info|warn|error).
    #[arg(long, env = "CLASSMAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files; relative paths resolve against the
    /// current directory.
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolves parsed arguments against the process working directory.
    pub fn resolve(args: CliArgs) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(Self::resolve_in(args, &cwd))
    }

    /// Resolves parsed arguments against an explicit base directory.
    pub fn resolve_in(args: CliArgs, base_dir: &Path) -> Self {
        let log_level = args
            .log_level
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| args.profile.log_level().to_string());
        let log_dir = if args.log_dir.is_absolute() {
            args.log_dir
        } else {
            base_dir.join(args.log_dir)
        };

        Self {
            input: args.input,
            output: args.output,
            log_level,
            log_dir,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentDir(err) => write!(f, "cannot determine current directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
        }
    }
}
