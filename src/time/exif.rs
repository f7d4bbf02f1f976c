//! EXIF capture time extraction for pictures

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

/// Layout of the EXIF `DateTimeOriginal` value
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Extract the original capture time (`DateTimeOriginal`) from a picture
///
/// Returns `Ok(None)` when the picture has no EXIF data or no
/// `DateTimeOriginal` tag. Unreadable files, corrupt containers and
/// malformed values are errors.
pub fn extract_capture_time(path: &Path) -> Result<Option<NaiveDateTime>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(what)) => {
            debug!(?path, what, "No EXIF data");
            return Ok(None);
        }
        Err(e) => {
            return Err(Error::ExifRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        debug!(?path, "No DateTimeOriginal tag");
        return Ok(None);
    };

    // display_value() reformats dates, so read the raw ASCII value instead
    let raw = match &field.value {
        Value::Ascii(values) => values
            .first()
            .map(|v| String::from_utf8_lossy(v).trim_end_matches('\0').to_string()),
        _ => None,
    }
    .ok_or_else(|| Error::ExifRead {
        path: path.to_path_buf(),
        message: "DateTimeOriginal is not an ASCII value".to_string(),
    })?;

    let datetime = parse_exif_datetime(&raw).map_err(|e| Error::TimestampParse {
        source_info: format!("DateTimeOriginal of {}", path.display()),
        message: format!("{:?}: {}", raw, e),
    })?;

    trace!(?path, %datetime, "Found EXIF capture time");
    Ok(Some(datetime))
}

/// Parse an EXIF timestamp, accepting only `YYYY:MM:DD HH:MM:SS`
pub fn parse_exif_datetime(s: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT)
}
