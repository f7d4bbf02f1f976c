//! Directory organizer
//!
//! Handles the per-run logic of:
//! - Listing the source directory once, without descending into subdirectories
//! - Classifying each file and resolving its date
//! - Moving it to `<source>/<YYYY-MM-DD>/<Pictures|Videos>/`

use crate::classify::{MediaCategory, classify, extension_of};
use crate::config::{Config, ConflictPolicy};
use crate::error::{Error, Result};
use crate::time::{TimeSource, resolve_date};
use chrono::NaiveDateTime;
use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Result of handling a single file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path (moved or would-be)
    pub destination: Option<PathBuf>,
    pub category: MediaCategory,
    /// Resolved timestamp and where it came from
    pub dated: Option<(NaiveDateTime, TimeSource)>,
    pub status: OutcomeStatus,
    /// Status line printed to stdout for this file, if any
    pub message: Option<String>,
}

/// Status of a handled file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// File was moved to its date folder
    Moved,
    /// Dry run - would have been moved
    DryRun,
    /// Extension not recognized, file left in place
    Unsupported,
    /// Destination name taken and the policy is to skip
    Conflict,
}

/// Totals for one organizer run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Every entry listed at start, including directories and unsupported files
    pub total_entries: usize,
    /// Files moved (or that would be moved in a dry run)
    pub moved: usize,
    pub unsupported: usize,
    pub conflicts: usize,
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome.status {
            OutcomeStatus::Moved | OutcomeStatus::DryRun => self.moved += 1,
            OutcomeStatus::Unsupported => self.unsupported += 1,
            OutcomeStatus::Conflict => self.conflicts += 1,
        }
        self.outcomes.push(outcome);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would move" } else { "Moved" };
        write!(f, "{} {} of {} files.", verb, self.moved, self.total_entries)
    }
}

/// Progress bar plus line-oriented status output on stdout
struct Progress {
    bar: ProgressBar,
}

impl Progress {
    fn new(len: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }

    /// Print a status line without tearing the bar
    fn println(&self, line: impl fmt::Display) {
        self.bar.suspend(|| println!("{}", line));
    }

    fn tick(&self, name: &str) {
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Sorts the files of one flat source directory into date folders
pub struct Organizer {
    config: Config,
}

impl Organizer {
    /// Create an organizer, checking that the source directory exists
    pub fn new(config: Config) -> Result<Self> {
        if !config.source_dir.is_dir() {
            return Err(Error::InvalidSource {
                path: config.source_dir.clone(),
            });
        }
        Ok(Self { config })
    }

    /// Run the organizer over the source directory
    ///
    /// Directory creation and move failures abort the run.
    pub fn run(&self) -> Result<RunSummary> {
        let _span = span!(Level::INFO, "organizer_run", source = ?self.config.source_dir).entered();

        let entries = self.list_entries()?;
        info!(count = entries.len(), "Listed source directory");

        let mut summary = RunSummary {
            total_entries: entries.len(),
            dry_run: self.config.dry_run,
            ..RunSummary::default()
        };

        let progress = Progress::new(entries.len(), self.config.show_progress);

        for path in &entries {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            // Non-files are skipped silently
            if path.is_file() {
                let outcome = self.organize_file(path)?;
                if let Some(ref message) = outcome.message {
                    progress.println(message);
                }
                summary.record(outcome);
            } else {
                debug!(?path, "Skipping non-file entry");
            }

            progress.tick(&name);
        }

        progress.finish();

        info!(
            total = summary.total_entries,
            moved = summary.moved,
            unsupported = summary.unsupported,
            conflicts = summary.conflicts,
            dry_run = summary.dry_run,
            "Run complete"
        );

        Ok(summary)
    }

    /// Entries directly inside the source directory, captured once
    fn list_entries(&self) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.config.source_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            entries.push(entry?.into_path());
        }
        Ok(entries)
    }

    fn organize_file(&self, path: &Path) -> Result<FileOutcome> {
        let _file_span = span!(Level::DEBUG, "organize_file", ?path).entered();

        let filename = path.file_name().ok_or_else(|| Error::InvalidSource {
            path: path.to_path_buf(),
        })?;

        let category = classify(path);
        let Some(folder) = category.folder_name() else {
            debug!(?path, "Unsupported extension, leaving in place");
            return Ok(FileOutcome {
                source: path.to_path_buf(),
                destination: None,
                category,
                dated: None,
                status: OutcomeStatus::Unsupported,
                message: Some(format!("Unsupported file type: {}", extension_of(path))),
            });
        };

        let resolved = resolve_date(path, category)?;
        let metadata_message = resolved.metadata_error.as_ref().map(|e| {
            format!(
                "Error processing {} {}: {}",
                category.label(),
                path.display(),
                e
            )
        });
        let dated = Some((resolved.timestamp, resolved.source));

        let dest_dir = self
            .config
            .source_dir
            .join(resolved.folder_name())
            .join(folder);
        let base_dest = dest_dir.join(filename);

        let dest = if base_dest.exists() {
            match self.config.on_conflict {
                ConflictPolicy::Rename => resolve_filename_conflict(base_dest)?,
                ConflictPolicy::Overwrite => {
                    debug!(?path, destination = ?base_dest, "Overwriting existing file");
                    base_dest
                }
                ConflictPolicy::Skip => {
                    warn!(?path, destination = ?base_dest, "Destination exists, leaving source in place");
                    let skipped = format!(
                        "Destination already exists, skipping: {}",
                        base_dest.display()
                    );
                    let message = match metadata_message {
                        Some(m) => format!("{}\n{}", m, skipped),
                        None => skipped,
                    };
                    return Ok(FileOutcome {
                        source: path.to_path_buf(),
                        destination: Some(base_dest),
                        category,
                        dated,
                        status: OutcomeStatus::Conflict,
                        message: Some(message),
                    });
                }
            }
        } else {
            base_dest
        };

        if self.config.dry_run {
            info!(source = ?path, destination = ?dest, time_source = ?resolved.source, "Would move file");
            return Ok(FileOutcome {
                source: path.to_path_buf(),
                destination: Some(dest),
                category,
                dated,
                status: OutcomeStatus::DryRun,
                message: metadata_message,
            });
        }

        ensure_dir(&dest_dir)?;
        move_file(path, &dest)?;

        info!(
            source = ?path,
            destination = ?dest,
            time_source = ?resolved.source,
            timestamp = %resolved.timestamp,
            "Moved file"
        );

        Ok(FileOutcome {
            source: path.to_path_buf(),
            destination: Some(dest),
            category,
            dated,
            status: OutcomeStatus::Moved,
            message: metadata_message,
        })
    }
}

/// Create a directory and its parents; succeeds if it already exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Resolve filename conflicts by adding a numeric suffix
fn resolve_filename_conflict(mut path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path);
    }

    let original = path.clone();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    for i in 1..10000 {
        path = parent.join(format!("{}_{}{}", stem, i, extension));
        if !path.exists() {
            debug!(?original, renamed = ?path, "Resolved name conflict");
            return Ok(path);
        }
    }

    Err(Error::NameConflict { path: original })
}

/// Move a file, falling back to copy + delete across file systems
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, dest) {
        debug!(?source, ?dest, error = %e, "Rename failed, copying instead");
        fs::copy(source, dest)?;

        if let Ok(mtime) = fs::metadata(source).and_then(|m| m.modified()) {
            let _ = filetime::set_file_mtime(dest, FileTime::from_system_time(mtime));
        }

        fs::remove_file(source)?;
    }
    Ok(())
}
