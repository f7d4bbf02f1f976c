//! Best-effort parsing of date strings from arbitrary metadata sources

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime};
use tracing::trace;

/// A supported date string layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Parsed as a naive date-time
    Naive(&'static str),
    /// Naive date-time with a `.ffffff` fraction of one to six digits and a `Z` suffix
    FractionalUtc(&'static str),
    /// Carries a numeric UTC offset; the written wall-clock time is kept
    WithOffset(&'static str),
}

/// Layouts in the order they are tried
const LAYOUTS: &[Layout] = &[
    Layout::FractionalUtc("%Y-%m-%dT%H:%M:%S%.fZ"),
    Layout::WithOffset("%Y-%m-%dT%H:%M:%S%z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
    Layout::Naive("%Y/%m/%d %H:%M:%S"),
    Layout::Naive("%Y-%m-%dT%H:%M:%S"),
    Layout::Naive("%Y:%m:%d %H:%M:%S"),
];

/// Microsecond precision at most
const MAX_FRACTION_DIGITS: usize = 6;

impl Layout {
    fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        match self {
            Layout::Naive(fmt) => NaiveDateTime::parse_from_str(s, fmt).ok(),
            Layout::FractionalUtc(fmt) => {
                let fraction = s.strip_suffix('Z')?.rsplit_once('.')?.1;
                if !(1..=MAX_FRACTION_DIGITS).contains(&fraction.len()) {
                    return None;
                }
                NaiveDateTime::parse_from_str(s, fmt).ok()
            }
            Layout::WithOffset(fmt) => DateTime::parse_from_str(s, fmt)
                .ok()
                .map(|dt| dt.naive_local()),
        }
    }
}

/// Parse a date string against each known layout, returning the first match
///
/// The whole string must match: surrounding whitespace is rejected. Returns
/// [`Error::TimestampParse`] when no layout matches.
pub fn parse_date_string(s: &str) -> Result<NaiveDateTime> {
    if s.trim() != s {
        return Err(Error::TimestampParse {
            source_info: format!("{:?}", s),
            message: "surrounding whitespace".to_string(),
        });
    }

    for layout in LAYOUTS {
        if let Some(dt) = layout.parse(s) {
            trace!(input = s, ?layout, "Parsed date string");
            return Ok(dt);
        }
    }

    Err(Error::TimestampParse {
        source_info: format!("{:?}", s),
        message: "no known date layout matched".to_string(),
    })
}
