//! Media Date Sorter - sort photos and videos into date folders
//!
//! This library moves the media files of one flat directory into
//! `<source>/<YYYY-MM-DD>/<Pictures|Videos>/` with support for:
//! - Extension-based classification of pictures and videos
//! - EXIF `DateTimeOriginal` extraction for pictures
//! - File system modification time fallback
//! - Explicit destination conflict policies and dry runs

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod organize;
pub mod time;

#[cfg(test)]
mod test_support;

pub use classify::{MediaCategory, classify};
pub use cli::Cli;
pub use config::{Config, ConfigError, ConflictPolicy};
pub use error::{Error, Result};
pub use organize::{FileOutcome, Organizer, OutcomeStatus, RunSummary, ensure_dir};
pub use time::{ResolvedDate, TimeSource, parse_date_string, resolve_date};
