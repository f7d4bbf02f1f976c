//! CLI argument parsing with clap

use crate::config::{Config, ConflictPolicy};
use crate::error::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Media Date Sorter - sort photos and videos into date folders
///
/// Moves every picture and video directly inside SOURCE into
/// SOURCE/YYYY-MM-DD/Pictures or SOURCE/YYYY-MM-DD/Videos, dated by the
/// EXIF capture time or, failing that, the file modification time.
#[derive(Parser, Debug)]
#[command(name = "media-date-sorter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to sort (overrides the config file)
    pub source: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// What to do when a file with the same name already exists at the destination
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Output log file lines as JSON
    #[arg(long, requires = "log_file")]
    pub json_log: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(policy) = self.on_conflict {
            config.on_conflict = policy;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }
        if self.no_progress {
            config.show_progress = false;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Result<Config> {
        let source = self.source.clone().ok_or_else(|| {
            Error::Config("a source directory is required (argument or config file)".into())
        })?;

        Ok(self.merge_with_config(Config::new(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_source() {
        let cli = Cli::try_parse_from(["media-date-sorter", "100CANON"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("100CANON"));
        assert_eq!(config.on_conflict, ConflictPolicy::Rename);
        assert!(!config.dry_run);
        assert!(config.show_progress);
    }

    #[test]
    fn test_source_required_without_config() {
        let cli = Cli::try_parse_from(["media-date-sorter", "-n"]).unwrap();
        assert!(matches!(cli.to_config(), Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "media-date-sorter",
            "incoming",
            "--on-conflict",
            "overwrite",
            "--no-progress",
            "-v",
        ])
        .unwrap();

        let file_config = Config {
            on_conflict: ConflictPolicy::Skip,
            dry_run: true,
            ..Config::new("from-file")
        };
        let config = cli.merge_with_config(file_config);

        assert_eq!(config.source_dir, PathBuf::from("incoming"));
        assert_eq!(config.on_conflict, ConflictPolicy::Overwrite);
        // Flags that are off on the CLI keep the file's value
        assert!(config.dry_run);
        assert!(config.verbose);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_json_log_requires_log_file() {
        assert!(Cli::try_parse_from(["media-date-sorter", "src", "--json-log"]).is_err());
        assert!(
            Cli::try_parse_from(["media-date-sorter", "src", "--json-log", "--log-file", "x.log"])
                .is_ok()
        );
    }
}
