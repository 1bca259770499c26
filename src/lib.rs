//! deckview: Browse image slide decks defined by CSV manifests.

pub mod inspect;
pub mod loader;
pub mod manifest;
pub mod report;
pub mod tui;
pub mod types;
