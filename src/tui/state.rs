//! TUI state algebra: pure types, zero effects.
//!
//! Design principle: Screen variants carry only per-screen transient
//! state (the cursor, playback). Shared data (the deck) lives in App.
//! Derived values like the position counter and the indicator row are
//! computed during rendering, not stored here.

use crossterm::event::KeyEvent;

use crate::types::{Deck, ImageStatus, ShowOptions};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Three producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - The one-shot loader thread sends `DeckLoaded`, then exits
/// - The ticker thread sends `Tick` on the auto-advance interval
///
/// The event loop dispatches: Key events go through `map_key → update`,
/// the others through dedicated handlers.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The loader finished. The deck may be the built-in placeholder
    /// set when the manifest could not be read.
    DeckLoaded(Deck),
    /// One auto-advance interval elapsed.
    Tick,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the shared data (deck, probe cache) and the current screen.
/// The effects layer reads this to know what to render.
#[derive(Debug)]
pub struct App {
    /// Current screen, carrying the cursor and playback state.
    pub screen: Screen,

    /// The loaded deck. None until the loader thread delivers it.
    pub deck: Option<Deck>,

    /// Lazily filled image probe results, parallel to the deck's slides.
    /// The effects layer probes the current slide before each render.
    pub probes: Vec<Option<ImageStatus>>,

    /// Whether the keybinding overlay is shown. While it is, ticks are
    /// suppressed so the deck holds still under the overlay.
    pub show_help: bool,

    /// Viewer configuration from the command line.
    pub options: ShowOptions,

    /// Set to true when the app should exit on the next loop pass.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
///
/// Each variant is a state in the navigation state machine. `Viewer`
/// exists only for non-empty decks, so its cursor invariant
/// (`cursor < deck.len()`) has no zero-length edge case to defend.
#[derive(Debug, Default, PartialEq)]
pub enum Screen {
    /// Manifest load in progress.
    #[default]
    Loading,

    /// The parsed deck has no slides. Navigation is never invoked here;
    /// the screen renders a fixed no-data placeholder.
    Empty,

    /// The carousel proper.
    Viewer {
        /// Index of the slide on screen. Always < deck length.
        cursor: usize,
        /// Auto-advance state.
        playback: Playback,
    },
}

/// Auto-advance state for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Ticks are ignored.
    Stopped,
    /// Each tick advances to the next slide.
    Playing,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions.
/// The transition function decides what each Action means per Screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Advance to the next slide, wrapping past the end.
    Next,
    /// Go back to the previous slide, wrapping past the start.
    Previous,
    /// Jump straight to a slide (0-based). Out of range is ignored.
    GoTo(usize),
    /// Jump to the first slide.
    First,
    /// Jump to the last slide.
    Last,
    /// One auto-advance interval elapsed. Behaves like Next while
    /// playback is running, otherwise ignored.
    Tick,
    /// Start or stop auto-advance.
    TogglePlayback,
    /// Show or hide the keybinding overlay.
    ToggleHelp,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The effects boundary inspects it
/// to decide what to render. Follows the Elm/TEA pattern: pure code
/// describes WHAT should happen, effectful code decides HOW.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App waiting for the loader thread.
    pub fn loading(options: ShowOptions) -> Self {
        App {
            screen: Screen::Loading,
            deck: None,
            probes: Vec::new(),
            show_help: false,
            options,
            should_quit: false,
        }
    }

    /// Create an App with a delivered deck.
    ///
    /// Lands on `Empty` for zero-length decks, otherwise on `Viewer`
    /// with the configured start slide (clamped into range) and
    /// playback state.
    pub fn with_deck(deck: Deck, options: ShowOptions) -> Self {
        let screen = if deck.is_empty() {
            Screen::Empty
        } else {
            Screen::Viewer {
                cursor: options.start.min(deck.len() - 1),
                playback: if options.autoplay {
                    Playback::Playing
                } else {
                    Playback::Stopped
                },
            }
        };

        App {
            screen,
            probes: vec![None; deck.len()],
            deck: Some(deck),
            show_help: false,
            options,
            should_quit: false,
        }
    }

    /// Number of slides in the delivered deck (0 while loading).
    pub fn deck_len(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::len)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::placeholder_deck;
    use crate::types::DeckSource;
    use std::path::PathBuf;

    fn deck_of(n: usize) -> Deck {
        Deck {
            slides: (0..n)
                .map(|i| crate::types::Slide {
                    caption: format!("Slide {}", i + 1),
                    image: PathBuf::from(format!("img{}.png", i + 1)),
                })
                .collect(),
            source: DeckSource::Manifest(PathBuf::from("images.csv")),
        }
    }

    #[test]
    fn app_loading_has_no_deck() {
        let app = App::loading(ShowOptions::default());
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.deck.is_none());
        assert_eq!(app.deck_len(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn app_with_empty_deck_lands_on_empty_screen() {
        let deck = Deck {
            slides: Vec::new(),
            source: DeckSource::Manifest(PathBuf::from("images.csv")),
        };
        let app = App::with_deck(deck, ShowOptions::default());
        assert_eq!(app.screen, Screen::Empty);
    }

    #[test]
    fn app_with_deck_lands_on_viewer_at_start() {
        let options = ShowOptions {
            start: 2,
            ..Default::default()
        };
        let app = App::with_deck(deck_of(5), options);
        assert_eq!(
            app.screen,
            Screen::Viewer {
                cursor: 2,
                playback: Playback::Stopped,
            }
        );
        assert_eq!(app.probes.len(), 5);
    }

    #[test]
    fn app_with_deck_clamps_start_into_range() {
        let options = ShowOptions {
            start: 99,
            ..Default::default()
        };
        let app = App::with_deck(deck_of(3), options);
        assert_eq!(
            app.screen,
            Screen::Viewer {
                cursor: 2,
                playback: Playback::Stopped,
            }
        );
    }

    #[test]
    fn app_with_deck_honors_autoplay_flag() {
        let options = ShowOptions {
            autoplay: true,
            ..Default::default()
        };
        let app = App::with_deck(deck_of(2), options);
        assert_eq!(
            app.screen,
            Screen::Viewer {
                cursor: 0,
                playback: Playback::Playing,
            }
        );
    }

    #[test]
    fn app_accepts_placeholder_deck() {
        let app = App::with_deck(
            placeholder_deck("boom".to_string()),
            ShowOptions::default(),
        );
        assert!(matches!(app.screen, Screen::Viewer { cursor: 0, .. }));
        assert!(app.deck.as_ref().is_some_and(Deck::is_builtin));
    }

    #[test]
    fn action_equality_for_matching() {
        // Actions need Eq for the transition function to pattern-match
        assert_eq!(Action::Next, Action::Next);
        assert_ne!(Action::Next, Action::Previous);
        assert_eq!(Action::GoTo(1), Action::GoTo(1));
        assert_ne!(Action::GoTo(1), Action::GoTo(2));
    }

    #[test]
    fn transition_variants_are_distinguishable() {
        let t1 = Transition::Screen(Screen::Empty);
        let t2 = Transition::Quit;
        assert_ne!(t1, t2);
    }
}
