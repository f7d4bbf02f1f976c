//! Media Date Sorter - sort photos and videos into date folders
//!
//! A CLI tool that moves the media files of a directory into
//! `YYYY-MM-DD/Pictures` and `YYYY-MM-DD/Videos` subfolders, dated by EXIF
//! capture time or file modification time.

use anyhow::Result;
use clap::Parser;
use media_date_sorter::{Cli, Config, Organizer, OutcomeStatus, RunSummary};
use std::path::Path;
use tracing::{Level, debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

mod cli_output {
    //! Colored console output for the end-of-run report

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// One line per handled file: icon, source, then destination or reason
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, dest_or_msg: &str) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(status_icon).with(status_color).bold()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(source).italic()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(dest_or_msg).with(CliTheme::HINT)));
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Verbosity may come from the config file, so load it before logging
    let config = load_config(&cli)?;
    let _guard = setup_logging(&cli, config.verbose)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Media Date Sorter starting"
    );
    if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loaded configuration from file");
    }
    debug!(?config, "Configuration loaded");

    let verbose = config.verbose;
    let organizer = match Organizer::new(config) {
        Ok(organizer) => organizer,
        Err(e) => {
            error!(error = %e, "Cannot start");
            cli_output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match organizer.run() {
        Ok(summary) => {
            if verbose {
                print_details(&summary);
            }
            if summary.dry_run {
                cli_output::print_warning("Dry run: no files were moved.");
            }
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            cli_output::print_error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}

/// Per-file report shown with `--verbose`
fn print_details(summary: &RunSummary) {
    use cli_output::*;

    print_separator();
    for outcome in &summary.outcomes {
        let source = outcome.source.display().to_string();
        let dest = outcome
            .destination
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        match outcome.status {
            OutcomeStatus::Moved => {
                print_result("✓", CliTheme::SUCCESS, &source, &format!("→ {}", dest))
            }
            OutcomeStatus::DryRun => {
                print_result("~", CliTheme::ACCENT, &source, &format!("→ {}", dest))
            }
            OutcomeStatus::Unsupported => {
                print_result("⊘", CliTheme::WARNING, &source, "unsupported file type")
            }
            OutcomeStatus::Conflict => print_result(
                "≡",
                CliTheme::ERROR,
                &source,
                &format!("already exists: {}", dest),
            ),
        }
    }
    print_separator();
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()?
    };

    Ok(config)
}

/// Setup logging: stderr always, plus an optional log file
///
/// Status lines already go to stdout, so the console only shows errors
/// unless verbose mode (flag or config file) or `RUST_LOG` asks for more.
fn setup_logging(cli: &Cli, verbose: bool) -> Result<Option<WorkerGuard>> {
    let (console_level, file_level) = log_levels(verbose);

    let env_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file_log, guard) = match cli.log_file.as_deref() {
        Some(log_path) => {
            let (layer, guard) = file_layer(log_path, cli.json_log, file_level)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_log)
        .with(console)
        .init();

    Ok(guard)
}

/// Console and log file levels
fn log_levels(verbose: bool) -> (Level, Level) {
    if verbose {
        (Level::DEBUG, Level::DEBUG)
    } else {
        (Level::ERROR, Level::INFO)
    }
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn file_layer(log_path: &Path, json: bool, level: Level) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let layer = if json {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(LevelFilter::from_level(level))
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(LevelFilter::from_level(level))
            .boxed()
    };

    Ok((layer, guard))
}
