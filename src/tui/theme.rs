//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - White bold: structure (title, caption)
//! - Cyan: interactive elements (keybinding hints, current indicator)
//! - Green: healthy (image found, playback running)
//! - Yellow: degraded but working (placeholder deck note)
//! - Red: broken image (missing / unreadable)
//! - Dim: de-emphasized (paths, metadata, idle indicators)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Healthy / image present (green).
pub const STYLE_OK: Style = Style::new().fg(Color::Green);

/// Degraded but working, like the placeholder fallback (yellow).
pub const STYLE_NOTE: Style = Style::new().fg(Color::Yellow);

/// Broken image (red).
pub const STYLE_BROKEN: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint (cyan).
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata (dark gray).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Slide caption.
pub const STYLE_CAPTION: Style = Style::new().add_modifier(Modifier::BOLD);

/// Preview frame border.
pub const STYLE_FRAME: Style = Style::new().fg(Color::DarkGray);

/// Indicator dot for the current slide.
pub const STYLE_INDICATOR_ON: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Indicator dots for the other slides.
pub const STYLE_INDICATOR_OFF: Style = Style::new().fg(Color::DarkGray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
