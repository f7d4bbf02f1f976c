//! Extension-based media classification

use std::path::Path;

/// Picture extensions, lowercase and without the leading dot
pub const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "heic", "webp"];

/// Video extensions, lowercase and without the leading dot
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "flv", "wmv", "mts", "m2ts", "3gp", "m4v", "mpg", "mpeg",
];

/// Media category derived from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    /// Still images
    Picture,
    /// Video clips
    Video,
    /// Anything else; left untouched by the organizer
    Unsupported,
}

impl MediaCategory {
    /// Folder name used under the date directory, `None` for unsupported files
    pub fn folder_name(&self) -> Option<&'static str> {
        match self {
            MediaCategory::Picture => Some("Pictures"),
            MediaCategory::Video => Some("Videos"),
            MediaCategory::Unsupported => None,
        }
    }

    /// Lowercase label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            MediaCategory::Picture => "picture",
            MediaCategory::Video => "video",
            MediaCategory::Unsupported => "unsupported",
        }
    }
}

/// Classify a file name by its extension (case-insensitive)
pub fn classify(filename: impl AsRef<Path>) -> MediaCategory {
    let ext = match filename.as_ref().extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return MediaCategory::Unsupported,
    };

    if PICTURE_EXTENSIONS.contains(&ext.as_str()) {
        MediaCategory::Picture
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaCategory::Video
    } else {
        MediaCategory::Unsupported
    }
}

/// Lowercased extension with its leading dot (`.txt`), or an empty string
pub fn extension_of(filename: impl AsRef<Path>) -> String {
    filename
        .as_ref()
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
