//! deckview CLI
//!
//! Browse image slide decks defined by CSV manifests in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use deckview::inspect::{inspect_deck, probe_slide, summarize};
use deckview::loader::read_deck;
use deckview::report::{format_check, format_listing};
use deckview::tui;
use deckview::types::{OutputFormat, ShowOptions, DEFAULT_MANIFEST, DEFAULT_TICK_SECONDS};

#[derive(Parser)]
#[command(name = "deckview")]
#[command(about = "Browse image slide decks defined by CSV manifests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    Show {
        /// Manifest to load (CSV lines of caption,path)
        path: Option<PathBuf>,

        /// Slide to start on (1-based, clamped into range)
        #[arg(long, default_value_t = 1)]
        start: usize,

        /// Start auto-advance immediately, moving every SECS seconds
        #[arg(long, value_name = "SECS")]
        autoplay: Option<u64>,
    },

    /// Print the slides a manifest defines (no terminal UI)
    List {
        /// Manifest to read
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Verify that every slide's image exists and is readable
    Check {
        /// Manifest to read
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            path,
            start,
            autoplay,
        } => cmd_show(path, start, autoplay),
        Commands::List { path, format } => cmd_list(path, format.into()),
        Commands::Check { path, format } => cmd_check(path, format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// MANIFEST RESOLUTION
// ============================================================================

/// Resolve the manifest path: use the provided path or the default name.
fn resolve_manifest(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message(msg.to_string());
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_show(path: Option<PathBuf>, start: usize, autoplay: Option<u64>) -> Result<(), String> {
    let options = ShowOptions {
        manifest: resolve_manifest(path),
        start: start.saturating_sub(1),
        tick_seconds: autoplay.unwrap_or(DEFAULT_TICK_SECONDS),
        autoplay: autoplay.is_some(),
    };

    tui::run(options).map_err(|e| e.to_string())
}

fn cmd_list(path: Option<PathBuf>, format: OutputFormat) -> Result<(), String> {
    let manifest = resolve_manifest(path);
    let deck = read_deck(&manifest).map_err(|e| e.to_string())?;

    print!("{}", format_listing(&deck, format));
    Ok(())
}

fn cmd_check(path: Option<PathBuf>, format: OutputFormat) -> Result<(), String> {
    let manifest = resolve_manifest(path);
    let deck = read_deck(&manifest).map_err(|e| e.to_string())?;

    let show_progress = format == OutputFormat::Human;

    if show_progress {
        eprintln!("Checking: {}", manifest.display());
    }

    // Probe every image in parallel
    let report = if show_progress {
        let pb = progress_bar(deck.len() as u64, "Probing images...");
        let checks: Vec<_> = deck
            .slides
            .par_iter()
            .progress_with(pb.clone())
            .map(probe_slide)
            .collect();
        pb.finish_with_message("Done");
        summarize(checks)
    } else {
        inspect_deck(&deck)
    };

    print!("{}", format_check(&report, format));
    Ok(())
}
