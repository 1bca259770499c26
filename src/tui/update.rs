//! Pure state transitions: (Screen, Action) → Transition.
//!
//! This is the core logic of the viewer. Fully testable without a
//! terminal. Each screen defines which actions it accepts; unhandled
//! actions return the current screen unchanged (no-op).

use crate::types::Deck;

use super::state::{Action, App, Playback, Screen, Transition};

/// Pure state transition function.
///
/// Given the current screen, an action, and the deck length, produces
/// the next transition. Navigation wraps: `Next` past the last slide
/// lands on the first, `Previous` before the first lands on the last.
pub fn update(screen: Screen, action: &Action, len: usize) -> Transition {
    match screen {
        Screen::Loading => update_loading(screen, action),
        Screen::Empty => update_empty(screen, action),
        Screen::Viewer { cursor, playback } => update_viewer(cursor, playback, action, len),
    }
}

/// Install a freshly delivered deck, replacing the Loading screen.
///
/// Lands on `Empty` for zero-length decks, otherwise on `Viewer` at the
/// configured start slide. The help overlay survives the swap.
pub fn apply_loaded(app: &mut App, deck: Deck) {
    let show_help = app.show_help;
    *app = App::with_deck(deck, app.options.clone());
    app.show_help = show_help;
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Loading: only Quit is meaningful. Everything else is a no-op.
fn update_loading(screen: Screen, action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(screen),
    }
}

/// Empty: a zero-length deck has no navigation transitions at all.
fn update_empty(screen: Screen, action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(screen),
    }
}

/// Viewer: all navigation, with modulo wraparound.
fn update_viewer(cursor: usize, playback: Playback, action: &Action, len: usize) -> Transition {
    // Viewer never exists for an empty deck; degrade to Empty rather
    // than divide by zero if it ever does.
    if len == 0 {
        return match action {
            Action::Quit => Transition::Quit,
            _ => Transition::Screen(Screen::Empty),
        };
    }

    let viewer = |cursor, playback| Transition::Screen(Screen::Viewer { cursor, playback });

    match action {
        Action::Next => viewer((cursor + 1) % len, playback),
        Action::Previous => viewer((cursor + len - 1) % len, playback),
        Action::GoTo(i) if *i < len => viewer(*i, playback),
        // Out-of-range jumps are ignored, not clamped.
        Action::GoTo(_) => viewer(cursor, playback),
        Action::First => viewer(0, playback),
        Action::Last => viewer(len - 1, playback),
        Action::Tick => match playback {
            Playback::Playing => viewer((cursor + 1) % len, playback),
            Playback::Stopped => viewer(cursor, playback),
        },
        Action::TogglePlayback => {
            let toggled = match playback {
                Playback::Stopped => Playback::Playing,
                Playback::Playing => Playback::Stopped,
            };
            viewer(cursor, toggled)
        }
        Action::Quit => Transition::Quit,
        _ => viewer(cursor, playback),
    }
}

// ============================================================================
// TESTS
// ============================================================================
