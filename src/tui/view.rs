//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.
//!
//! The slide panel draws the image as a box-character frame proportioned
//! to the real pixel aspect ratio when the probe sniffed one, with the
//! path and metadata underneath. Broken images get a placeholder frame
//! instead; the render path never fails.

use humansize::{format_size, BINARY};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::types::{Deck, DeckSource, ImageStatus, Slide};

use super::state::{App, Playback, Screen};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    let title = render_title(app);
    frame.render_widget(title, chunks[0]);

    let help = render_help(app);
    frame.render_widget(help, chunks[2]);

    let content_area = chunks[1];

    if app.show_help {
        render_help_overlay(frame, content_area);
        return;
    }

    match &app.screen {
        Screen::Loading => {
            render_loading(app, frame, content_area);
        }
        Screen::Empty => {
            if let Some(deck) = &app.deck {
                render_empty(deck, frame, content_area);
            }
        }
        Screen::Viewer { cursor, playback } => {
            if let Some(deck) = &app.deck {
                render_viewer(deck, &app.probes, *cursor, *playback, frame, content_area);
            }
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name plus where the slides came from.
fn render_title(app: &App) -> Paragraph<'static> {
    let source = match &app.deck {
        Some(deck) if deck.is_builtin() => "built-in slides".to_string(),
        Some(Deck {
            source: DeckSource::Manifest(path),
            ..
        }) => path.display().to_string(),
        _ => app.options.manifest.display().to_string(),
    };

    Paragraph::new(Line::from(vec![
        Span::styled("deckview", theme::STYLE_TITLE),
        Span::styled(format!("  {}", source), theme::STYLE_DIM),
    ]))
}

/// Help line showing available keybindings for the current screen.
fn render_help(app: &App) -> Paragraph<'static> {
    let help_text = if app.show_help {
        "[?] close help"
    } else {
        match &app.screen {
            Screen::Loading => "^C quit",
            Screen::Empty => "[q] quit",
            Screen::Viewer { .. } => {
                "[←/→] navigate  [1-9] jump  [Space] play/pause  [?] help  [q] quit"
            }
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: LOADING
// ============================================================================

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Loading manifest...",
            theme::STYLE_INTERACTIVE,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("    {}", app.options.manifest.display()),
            theme::STYLE_DIM,
        )),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: EMPTY DECK
// ============================================================================

fn render_empty(deck: &Deck, frame: &mut Frame, area: Rect) {
    let manifest = match &deck.source {
        DeckSource::Manifest(path) => path.display().to_string(),
        DeckSource::Builtin { .. } => "built-in slides".to_string(),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("  No slides to show", theme::STYLE_TITLE)),
        Line::from(Span::styled("  ═════════════════", theme::STYLE_DIM)),
        Line::from(""),
        Line::from(format!(
            "  {} was read, but no line survived parsing.",
            manifest
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Slides are CSV lines of the form:",
            theme::STYLE_DIM,
        )),
        Line::from(Span::styled(
            "      caption,path/to/image.png",
            theme::STYLE_INTERACTIVE,
        )),
        Line::from(Span::styled(
            "  Blank lines and lines starting with # are ignored.",
            theme::STYLE_DIM,
        )),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: VIEWER
// ============================================================================

fn render_viewer(
    deck: &Deck,
    probes: &[Option<ImageStatus>],
    cursor: usize,
    playback: Playback,
    frame: &mut Frame,
    area: Rect,
) {
    let Some(slide) = deck.slides.get(cursor) else {
        let err = Paragraph::new("Slide not found").style(theme::STYLE_BROKEN);
        frame.render_widget(err, area);
        return;
    };

    // Split: slide panel + indicator row + status bar
    let chunks = Layout::vertical([
        Constraint::Min(0),    // slide panel
        Constraint::Length(1), // indicator row
        Constraint::Length(1), // status
    ])
    .split(area);

    let probe = probes.get(cursor).and_then(|p| p.as_ref());
    render_slide(slide, probe, frame, chunks[0]);

    let indicators = render_indicators(deck.len(), cursor);
    frame.render_widget(indicators, chunks[1]);

    let status = render_status(deck, cursor, playback);
    frame.render_widget(status, chunks[2]);
}

fn render_slide(slide: &Slide, probe: Option<&ImageStatus>, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", slide.caption),
            theme::STYLE_CAPTION,
        )),
        Line::from(""),
    ];

    let dimensions = match probe {
        Some(ImageStatus::Found { dimensions, .. }) => *dimensions,
        _ => None,
    };
    let (box_w, box_h) = preview_size(dimensions, area);
    lines.extend(preview_frame(probe, box_w, box_h));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", slide.image.display()),
        theme::STYLE_DIM,
    )));
    lines.push(meta_line(probe));

    // No wrapping: a wrapped frame row would shear the box art.
    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

/// Fit the preview frame into the content area.
///
/// Terminal cells are roughly twice as tall as they are wide, so the
/// pixel aspect ratio gets a 2x width factor when projected onto cells.
/// Unknown dimensions fall back to a fixed landscape frame.
fn preview_size(dimensions: Option<(u32, u32)>, area: Rect) -> (u16, u16) {
    let max_w = area.width.saturating_sub(8).clamp(8, 64);
    let max_h = area.height.saturating_sub(8).clamp(3, 14);

    let (w, h) = match dimensions {
        Some((w, h)) if w > 0 && h > 0 => (w as u64, h as u64),
        _ => return (max_w.min(32), max_h.min(8)),
    };

    // Try full width first, shrink to fit the height.
    let mut box_w = max_w as u64;
    let mut box_h = (box_w * h / (w * 2)).max(1);
    if box_h > max_h as u64 {
        box_h = max_h as u64;
        box_w = (box_h * 2 * w / h).clamp(4, max_w as u64);
    }

    (box_w as u16, box_h as u16)
}

/// The frame itself: a box of line-drawing characters with a one-line
/// label centered inside. Broken images turn the frame red.
fn preview_frame(probe: Option<&ImageStatus>, box_w: u16, box_h: u16) -> Vec<Line<'static>> {
    let w = box_w as usize;

    let (label, label_style) = match probe {
        None => (String::new(), theme::STYLE_DIM),
        Some(ImageStatus::Found {
            dimensions: Some((pw, ph)),
            ..
        }) => (format!("{} × {}", pw, ph), theme::STYLE_DIM),
        Some(ImageStatus::Found { .. }) => ("no preview".to_string(), theme::STYLE_DIM),
        Some(ImageStatus::Missing) | Some(ImageStatus::Unreadable(_)) => {
            ("image unavailable".to_string(), theme::STYLE_BROKEN)
        }
    };
    let frame_style = match probe {
        Some(ImageStatus::Missing) | Some(ImageStatus::Unreadable(_)) => theme::STYLE_BROKEN,
        _ => theme::STYLE_FRAME,
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("  ┌{}┐", "─".repeat(w)),
        frame_style,
    )));

    for row in 0..box_h {
        if row == box_h / 2 && !label.is_empty() {
            let pad = w.saturating_sub(label.chars().count());
            let left = pad / 2;
            lines.push(Line::from(vec![
                Span::styled("  │", frame_style),
                Span::raw(" ".repeat(left)),
                Span::styled(label.clone(), label_style),
                Span::raw(" ".repeat(pad - left)),
                Span::styled("│", frame_style),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  │{}│", " ".repeat(w)),
                frame_style,
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        format!("  └{}┘", "─".repeat(w)),
        frame_style,
    )));
    lines
}

/// One line of probe metadata under the path.
fn meta_line(probe: Option<&ImageStatus>) -> Line<'static> {
    match probe {
        None => Line::from(Span::styled("  probing...", theme::STYLE_DIM)),
        Some(ImageStatus::Found {
            bytes,
            format,
            dimensions,
        }) => {
            let mut parts = Vec::new();
            if let Some(format) = format {
                parts.push(format.label().to_string());
            }
            if let Some((w, h)) = dimensions {
                parts.push(format!("{} × {}", w, h));
            }
            parts.push(format_size(*bytes, BINARY));
            Line::from(Span::styled(
                format!("  {}", parts.join("  ·  ")),
                theme::STYLE_OK,
            ))
        }
        Some(ImageStatus::Missing) => Line::from(Span::styled(
            "  missing image (showing placeholder)",
            theme::STYLE_BROKEN,
        )),
        Some(ImageStatus::Unreadable(reason)) => Line::from(Span::styled(
            format!("  unreadable image: {} (showing placeholder)", reason),
            theme::STYLE_BROKEN,
        )),
    }
}

/// One dot per slide, the current one filled.
fn render_indicators(len: usize, cursor: usize) -> Paragraph<'static> {
    let mut spans = vec![Span::raw("  ")];
    for i in 0..len {
        if i == cursor {
            spans.push(Span::styled("● ", theme::STYLE_INDICATOR_ON));
        } else {
            spans.push(Span::styled("○ ", theme::STYLE_INDICATOR_OFF));
        }
    }
    Paragraph::new(Line::from(spans))
}

/// Position counter, playback state, and the placeholder-deck note.
fn render_status(deck: &Deck, cursor: usize, playback: Playback) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!("  slide {} of {}", cursor + 1, deck.len()),
        theme::STYLE_DIM,
    )];

    if playback == Playback::Playing {
        spans.push(Span::styled("   ▶ playing", theme::STYLE_OK));
    }

    if let DeckSource::Builtin { reason } = &deck.source {
        spans.push(Span::styled(
            format!("   placeholder deck ({})", reason),
            theme::STYLE_NOTE,
        ));
    }

    Paragraph::new(Line::from(spans))
}

// ============================================================================
// HELP OVERLAY
// ============================================================================

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let binding = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), theme::STYLE_INTERACTIVE),
            Span::raw(what),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Keybindings", theme::STYLE_TITLE)),
        Line::from(Span::styled("  ═══════════", theme::STYLE_DIM)),
        Line::from(""),
        binding("← h", "previous slide"),
        binding("→ l", "next slide"),
        binding("1-9", "jump to slide"),
        binding("g Home", "first slide"),
        binding("G End", "last slide"),
        binding("Space", "start/stop auto-advance"),
        binding("?", "close this help"),
        binding("q Esc ^C", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Auto-advance holds still while this help is open.",
            theme::STYLE_DIM,
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
