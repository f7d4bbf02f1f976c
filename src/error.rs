//! Error types for the media date sorter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media date sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media date sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to parse timestamp from {source_info}: {message}")]
    TimestampParse { source_info: String, message: String },

    #[error("Source directory is not usable: {path}")]
    InvalidSource { path: PathBuf },

    #[error("Could not find a free file name for {path}")]
    NameConflict { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory listing error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
