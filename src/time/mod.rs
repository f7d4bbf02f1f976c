//! Date resolution module
//!
//! Pictures are dated by their EXIF `DateTimeOriginal` tag. Videos, and
//! pictures whose metadata is missing or unreadable, fall back to the file
//! system modification time in local time.

pub mod exif;
pub mod parse;

use crate::classify::MediaCategory;
use crate::error::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub use parse::parse_date_string;

/// Source of the resolved timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// EXIF `DateTimeOriginal`
    Exif,
    /// File system modification time
    FileSystem,
}

/// Date chosen for a media file
#[derive(Debug)]
pub struct ResolvedDate {
    pub timestamp: NaiveDateTime,
    pub source: TimeSource,
    /// Why metadata could not be read, when a picture fell back to mtime.
    /// `None` when the picture simply carries no capture time.
    pub metadata_error: Option<Error>,
}

impl ResolvedDate {
    /// Date folder name, `YYYY-MM-DD`
    pub fn folder_name(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Resolve the date a media file was taken
///
/// Metadata problems are never fatal; only an unreadable modification time
/// is reported as an error.
pub fn resolve_date(path: &Path, category: MediaCategory) -> Result<ResolvedDate> {
    let mut metadata_error = None;

    if category == MediaCategory::Picture {
        match exif::extract_capture_time(path) {
            Ok(Some(timestamp)) => {
                debug!(?path, %timestamp, "Dated from EXIF");
                return Ok(ResolvedDate {
                    timestamp,
                    source: TimeSource::Exif,
                    metadata_error: None,
                });
            }
            Ok(None) => {
                debug!(?path, "No capture time recorded, using modification time");
            }
            Err(e) => {
                warn!(?path, category = category.label(), error = %e, "Unreadable capture time, using modification time");
                metadata_error = Some(e);
            }
        }
    }

    let timestamp = modification_time(path)?;
    debug!(?path, %timestamp, "Dated from modification time");

    Ok(ResolvedDate {
        timestamp,
        source: TimeSource::FileSystem,
        metadata_error,
    })
}

/// Last-modified time of a file as a local wall-clock time
pub fn modification_time(path: &Path) -> Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        PLAIN_JPEG, jpeg_with_capture_time, naive, set_local_mtime, write_file,
    };
    use tempfile::tempdir;

    #[test]
    fn test_exif_wins_over_mtime() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "photo.jpg",
            &jpeg_with_capture_time("2023:05:14 10:22:00"),
        );
        set_local_mtime(&path, "2020-01-01 12:00:00");

        let resolved = resolve_date(&path, MediaCategory::Picture).unwrap();
        assert_eq!(resolved.timestamp, naive("2023-05-14 10:22:00"));
        assert_eq!(resolved.source, TimeSource::Exif);
        assert!(resolved.metadata_error.is_none());
        assert_eq!(resolved.folder_name(), "2023-05-14");
    }

    #[test]
    fn test_picture_without_exif_uses_mtime() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "scan.png", b"not really a png");
        set_local_mtime(&path, "2021-07-04 09:30:00");

        let resolved = resolve_date(&path, MediaCategory::Picture).unwrap();
        assert_eq!(resolved.timestamp, naive("2021-07-04 09:30:00"));
        assert_eq!(resolved.source, TimeSource::FileSystem);
        assert!(resolved.metadata_error.is_some());
    }

    #[test]
    fn test_jpeg_without_exif_falls_back_quietly() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "plain.jpg", PLAIN_JPEG);
        set_local_mtime(&path, "2022-03-03 15:00:00");

        let resolved = resolve_date(&path, MediaCategory::Picture).unwrap();
        assert_eq!(resolved.timestamp, naive("2022-03-03 15:00:00"));
        assert_eq!(resolved.source, TimeSource::FileSystem);
        assert!(resolved.metadata_error.is_none());
    }

    #[test]
    fn test_video_ignores_exif() {
        let dir = tempdir().unwrap();
        // Even EXIF-looking bytes are not consulted for videos
        let path = write_file(
            dir.path(),
            "clip.mp4",
            &jpeg_with_capture_time("2023:05:14 10:22:00"),
        );
        set_local_mtime(&path, "2023-06-01 08:00:00");

        let resolved = resolve_date(&path, MediaCategory::Video).unwrap();
        assert_eq!(resolved.timestamp, naive("2023-06-01 08:00:00"));
        assert_eq!(resolved.source, TimeSource::FileSystem);
        assert!(resolved.metadata_error.is_none());
        assert_eq!(resolved.folder_name(), "2023-06-01");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(resolve_date(&dir.path().join("gone.mp4"), MediaCategory::Video).is_err());
    }
}
