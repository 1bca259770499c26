//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal; all intelligence lives in the pure layers.
//!
//! Architecture: three producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Loader thread: reads the manifest once and sends the finished deck
//! - Ticker thread: sends auto-advance ticks at a fixed interval
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::inspect::probe_image;
use crate::loader::load_or_placeholder;
use crate::types::ShowOptions;

use super::state::{Action, App, AppEvent, Screen, Transition};
use super::update::{apply_loaded, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Previous),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Next),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::First),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Last),

        // Direct jumps: the 1 key is the first slide
        KeyCode::Char(c @ '1'..='9') => Some(Action::GoTo((c as u8 - b'1') as usize)),

        // Playback and overlay
        KeyCode::Char(' ') => Some(Action::TogglePlayback),
        KeyCode::Char('?') => Some(Action::ToggleHelp),

        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key events to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

/// Spawn the one-shot loader thread.
///
/// Sends exactly one DeckLoaded event. A manifest that cannot be read
/// is already resolved to the built-in placeholder deck by the loader,
/// so the event always carries a usable deck.
fn spawn_loader(manifest: PathBuf, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let deck = load_or_placeholder(&manifest);
        let _ = tx.send(AppEvent::DeckLoaded(deck));
    });
}

/// Spawn the auto-advance ticker.
///
/// Ticks at a fixed interval for the lifetime of the TUI. Whether a
/// tick actually moves the carousel is decided in the pure update
/// layer, so the thread itself never needs to pause or resume.
fn spawn_ticker(interval: Duration, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(AppEvent::Tick).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop, loading the manifest in the background.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// spawns the producer threads, and runs the event loop until the user
/// quits.
pub fn run(options: ShowOptions) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let tick_seconds = options.tick_seconds.max(1);
    let manifest = options.manifest.clone();
    let mut app = App::loading(options);

    let (tx, rx) = mpsc::channel::<AppEvent>();

    // Spawn producer threads
    spawn_key_reader(tx.clone());
    spawn_loader(manifest, tx.clone());
    spawn_ticker(Duration::from_secs(tick_seconds), tx);

    loop {
        // Probe the visible slide before drawing so its metadata (or the
        // broken-image placeholder) is on screen from the first frame.
        probe_current(&mut app);

        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key) {
                    dispatch(&mut app, &action);
                }
            }
            AppEvent::DeckLoaded(deck) => {
                apply_loaded(&mut app, deck);
            }
            AppEvent::Tick => {
                // The help overlay freezes auto-advance
                if !app.show_help {
                    dispatch(&mut app, &Action::Tick);
                }
            }
        }
    }

    restore_terminal()?;
    Ok(())
}

/// Route one action through the pure update layer.
///
/// The help overlay is App-level state (it can cover any screen), so
/// ToggleHelp is handled here rather than in update(). While the
/// overlay is open, everything except closing it and quitting is
/// swallowed.
fn dispatch(app: &mut App, action: &Action) {
    if app.show_help {
        match action {
            Action::ToggleHelp => app.show_help = false,
            Action::Quit => app.should_quit = true,
            _ => {}
        }
        return;
    }

    if *action == Action::ToggleHelp {
        app.show_help = true;
        return;
    }

    let screen = std::mem::take(&mut app.screen);
    match update(screen, action, app.deck_len()) {
        Transition::Screen(next) => app.screen = next,
        Transition::Quit => app.should_quit = true,
    }
}

/// Probe the image of the slide under the cursor, once.
///
/// Probing happens lazily on first display rather than up front, so a
/// large deck opens instantly. Results are cached in App::probes and
/// never re-checked while the TUI runs.
fn probe_current(app: &mut App) {
    let cursor = match app.screen {
        Screen::Viewer { cursor, .. } => cursor,
        _ => return,
    };
    let Some(deck) = &app.deck else {
        return;
    };
    let Some(slot) = app.probes.get_mut(cursor) else {
        return;
    };
    if slot.is_none() {
        if let Some(slide) = deck.slides.get(cursor) {
            *slot = Some(probe_image(&slide.image));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Deck, DeckSource, Slide};
    use std::path::PathBuf;

    fn deck_of(n: usize) -> Deck {
        Deck {
            slides: (0..n)
                .map(|i| Slide {
                    caption: format!("Slide {}", i + 1),
                    image: PathBuf::from(format!("img{}.png", i + 1)),
                })
                .collect(),
            source: DeckSource::Manifest(PathBuf::from("images.csv")),
        }
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn arrow_keys_map_to_navigation() {
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(map_key(left), Some(Action::Previous));
        assert_eq!(map_key(right), Some(Action::Next));
    }

    #[test]
    fn vim_keys_map_to_navigation() {
        let h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        let l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(map_key(h), Some(Action::Previous));
        assert_eq!(map_key(l), Some(Action::Next));
    }

    #[test]
    fn digit_keys_map_to_zero_based_jumps() {
        for n in 1..=9u8 {
            let key = KeyEvent::new(KeyCode::Char((b'0' + n) as char), KeyModifiers::NONE);
            assert_eq!(map_key(key), Some(Action::GoTo((n - 1) as usize)));
        }
    }

    #[test]
    fn home_and_end_map_to_first_and_last() {
        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        let g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        let cap_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(map_key(home), Some(Action::First));
        assert_eq!(map_key(g), Some(Action::First));
        assert_eq!(map_key(end), Some(Action::Last));
        assert_eq!(map_key(cap_g), Some(Action::Last));
    }

    #[test]
    fn space_toggles_playback() {
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(map_key(space), Some(Action::TogglePlayback));
    }

    #[test]
    fn question_mark_toggles_help() {
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Action::ToggleHelp));
    }

    #[test]
    fn quit_keys_map_to_quit() {
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(map_key(q), Some(Action::Quit));
        assert_eq!(map_key(esc), Some(Action::Quit));
    }

    #[test]
    fn unmapped_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }

    // --- dispatch tests (pure, no terminal involved) ---

    #[test]
    fn dispatch_routes_navigation_to_the_screen() {
        let mut app = App::with_deck(deck_of(3), crate::types::ShowOptions::default());
        dispatch(&mut app, &Action::Next);
        assert!(matches!(app.screen, Screen::Viewer { cursor: 1, .. }));
    }

    #[test]
    fn help_overlay_swallows_navigation() {
        let mut app = App::with_deck(deck_of(3), crate::types::ShowOptions::default());
        dispatch(&mut app, &Action::ToggleHelp);
        assert!(app.show_help);

        dispatch(&mut app, &Action::Next);
        assert!(
            matches!(app.screen, Screen::Viewer { cursor: 0, .. }),
            "Navigation should not move the carousel under the overlay"
        );

        dispatch(&mut app, &Action::ToggleHelp);
        assert!(!app.show_help);

        dispatch(&mut app, &Action::Next);
        assert!(matches!(app.screen, Screen::Viewer { cursor: 1, .. }));
    }

    #[test]
    fn quit_works_under_the_help_overlay() {
        let mut app = App::with_deck(deck_of(2), crate::types::ShowOptions::default());
        dispatch(&mut app, &Action::ToggleHelp);
        dispatch(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn quit_works_while_loading() {
        let mut app = App::loading(crate::types::ShowOptions::default());
        dispatch(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }
}
