//! Fixtures shared by unit tests

use chrono::{Local, NaiveDateTime, TimeZone};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};

/// SOI followed by EOI: a JPEG with no EXIF segment
pub const PLAIN_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

/// Build a minimal JPEG whose APP1 segment carries a `DateTimeOriginal` tag
pub fn jpeg_with_capture_time(value: &str) -> Vec<u8> {
    jpeg_with_exif_tag(0x9003, value)
}

/// Build a minimal JPEG with a single ASCII tag in its Exif IFD
///
/// Layout (little-endian TIFF): IFD0 holds only the Exif IFD pointer, the
/// Exif IFD holds only `tag`, followed by the ASCII value.
pub fn jpeg_with_exif_tag(tag: u16, value: &str) -> Vec<u8> {
    let mut ascii = value.as_bytes().to_vec();
    ascii.push(0);
    assert!(ascii.len() > 4, "value must not fit inline in the IFD entry");

    const IFD0_OFFSET: u32 = 8;
    const EXIF_IFD_OFFSET: u32 = IFD0_OFFSET + 2 + 12 + 4;
    const VALUE_OFFSET: u32 = EXIF_IFD_OFFSET + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&IFD0_OFFSET.to_le_bytes());

    // IFD0: ExifIFDPointer (0x8769, LONG)
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&EXIF_IFD_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: one ASCII entry
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(ascii.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&VALUE_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&ascii);

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Parse `YYYY-MM-DD HH:MM:SS`
pub fn naive(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Set a file's modification time to the given local wall-clock time
pub fn set_local_mtime(path: &Path, local: &str) {
    let local = Local.from_local_datetime(&naive(local)).earliest().unwrap();
    filetime::set_file_mtime(path, FileTime::from_unix_time(local.timestamp(), 0)).unwrap();
}
