//! Configuration types for the media date sorter

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when the destination already holds a file with the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Append `_1`, `_2`, ... to the file stem until the name is free
    #[default]
    Rename,
    /// Leave the source file where it is
    Skip,
    /// Replace the existing destination file
    Overwrite,
}

/// Configuration for the media date sorter
///
/// The recognized extensions are fixed at build time, see [`crate::classify`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Flat directory whose files are sorted in place
    pub source_dir: PathBuf,

    /// Destination name collision policy
    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    /// Report what would happen without touching the file system
    #[serde(default)]
    pub dry_run: bool,

    /// Verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Draw a progress bar on stderr
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            on_conflict: ConflictPolicy::default(),
            dry_run: false,
            verbose: false,
            show_progress: true,
        }
    }
}

impl Config {
    /// Configuration for sorting `source_dir` with default settings
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}
