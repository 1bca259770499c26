//! Domain types for deckview.

use serde::Serialize;
use std::path::PathBuf;

/// Manifest read when no path is given on the command line.
pub const DEFAULT_MANIFEST: &str = "images.csv";

/// Seconds between auto-advance ticks unless overridden.
pub const DEFAULT_TICK_SECONDS: u64 = 5;

// ============================================================================
// SLIDES
// ============================================================================

/// One slide: a caption and the image file it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Display caption (first manifest field, trimmed).
    pub caption: String,
    /// Image file path (second manifest field, trimmed).
    pub image: PathBuf,
}

/// Where the current deck came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSource {
    /// Parsed from a manifest file on disk.
    Manifest(PathBuf),
    /// Built-in placeholder slides, substituted when the manifest
    /// could not be read. Carries the reason for the status line.
    Builtin { reason: String },
}

/// An ordered collection of slides plus its provenance.
///
/// A deck may be empty (a readable manifest with no surviving lines);
/// the viewer renders a dedicated screen for that case instead of
/// indexed slides.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Slides in manifest order. Duplicates are kept.
    pub slides: Vec<Slide>,
    /// Provenance of the slides.
    pub source: DeckSource,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// True when the deck is the built-in placeholder set.
    pub fn is_builtin(&self) -> bool {
        matches!(self.source, DeckSource::Builtin { .. })
    }
}

// ============================================================================
// IMAGE PROBES
// ============================================================================

/// Image container formats recognized by the header sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    Png,
    Gif,
    Bmp,
    Jpeg,
}

impl ImageFormat {
    /// Short uppercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Jpeg => "JPEG",
        }
    }
}

/// Outcome of probing one slide's image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImageStatus {
    /// File exists and is readable.
    Found {
        /// Size on disk in bytes.
        bytes: u64,
        /// Container format, when the header is recognized.
        format: Option<ImageFormat>,
        /// Pixel dimensions (width, height), when the header carries them.
        dimensions: Option<(u32, u32)>,
    },
    /// File does not exist.
    Missing,
    /// File exists but could not be opened or read.
    Unreadable(String),
}

/// Per-slide outcome of a deck check.
#[derive(Debug, Clone, Serialize)]
pub struct SlideCheck {
    /// Caption of the slide this entry belongs to.
    pub caption: String,
    /// Image path that was probed.
    pub image: PathBuf,
    /// What the probe found.
    pub status: ImageStatus,
}

/// Complete results of probing every slide in a deck.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// One entry per slide, in deck order.
    pub entries: Vec<SlideCheck>,
    /// Slides whose images were found and readable.
    pub found: usize,
    /// Slides whose image files do not exist.
    pub missing: usize,
    /// Slides whose image files exist but could not be read.
    pub unreadable: usize,
    /// Total bytes across found images.
    pub bytes_total: u64,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for the interactive viewer.
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Manifest to load.
    pub manifest: PathBuf,
    /// Initial cursor position (0-based, clamped into range at load).
    pub start: usize,
    /// Seconds between auto-advance ticks.
    pub tick_seconds: u64,
    /// Whether playback starts running.
    pub autoplay: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            start: 0,
            tick_seconds: DEFAULT_TICK_SECONDS,
            autoplay: false,
        }
    }
}
