//! Manifest loading: disk to deck.
//!
//! Thin I/O layer over the pure parser in [`crate::manifest`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::parse_slides;
use crate::types::{Deck, DeckSource, Slide};

/// Why a manifest could not be turned into text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    Utf8 { path: PathBuf },
}

/// Read and parse a manifest from disk.
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read or is not UTF-8.
/// A readable manifest that parses to zero slides is an empty deck,
/// not an error.
pub fn read_deck(path: &Path) -> Result<Deck, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::Utf8 {
        path: path.to_path_buf(),
    })?;

    Ok(Deck {
        slides: parse_slides(&text),
        source: DeckSource::Manifest(path.to_path_buf()),
    })
}

/// Load a deck for the viewer, substituting the built-in placeholder
/// slides when the manifest cannot be read.
///
/// This is the only recovery path: no retries, no partial decks. The
/// failure reason travels in [`DeckSource::Builtin`] so the viewer can
/// note it in the status line without treating it as a failure state.
pub fn load_or_placeholder(path: &Path) -> Deck {
    match read_deck(path) {
        Ok(deck) => deck,
        Err(e) => placeholder_deck(e.to_string()),
    }
}

/// The fixed built-in deck used when no manifest can be read.
///
/// The image paths deliberately point at nothing, so the preview panel
/// exercises its per-slide placeholder for every one of them.
pub fn placeholder_deck(reason: String) -> Deck {
    let slides = [
        ("Welcome to deckview", "placeholder/welcome.png"),
        ("No manifest could be read", "placeholder/missing.png"),
        ("Create images.csv with caption,path lines", "placeholder/format.png"),
        ("Press ? for keybindings", "placeholder/help.png"),
    ]
    .into_iter()
    .map(|(caption, image)| Slide {
        caption: caption.to_string(),
        image: PathBuf::from(image),
    })
    .collect();

    Deck {
        slides,
        source: DeckSource::Builtin { reason },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper: write a manifest file and return (dir, path).
    fn write_manifest(content: &[u8]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("images.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        (dir, path)
    }

    // --- read_deck tests ---

    #[test]
    fn test_read_deck_parses_manifest() {
        let (_dir, path) = write_manifest(b"A,imgA.png\n#comment\n\nB,imgB.png\n");
        let deck = read_deck(&path).unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides[0].caption, "A");
        assert_eq!(deck.slides[1].image, PathBuf::from("imgB.png"));
        assert_eq!(deck.source, DeckSource::Manifest(path));
    }

    #[test]
    fn test_read_deck_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let err = read_deck(&path).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_read_deck_rejects_invalid_utf8() {
        let (_dir, path) = write_manifest(&[0xff, 0xfe, b'A', b',', b'x']);

        let err = read_deck(&path).unwrap_err();
        assert!(matches!(err, LoadError::Utf8 { .. }));
    }

    #[test]
    fn test_read_deck_empty_parse_is_an_empty_deck_not_an_error() {
        let (_dir, path) = write_manifest(b"#only comments\n");
        let deck = read_deck(&path).unwrap();

        assert!(deck.is_empty());
        assert!(!deck.is_builtin());
    }

    // --- load_or_placeholder tests ---

    #[test]
    fn test_load_falls_back_to_placeholders_on_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let deck = load_or_placeholder(&path);
        assert!(deck.is_builtin());
        assert!(deck.len() > 0);
        assert_eq!(deck.slides, placeholder_deck(String::new()).slides);
    }

    #[test]
    fn test_load_does_not_substitute_placeholders_for_empty_parse() {
        // A readable manifest with no surviving lines stays empty; only
        // read failure triggers the placeholder set.
        let (_dir, path) = write_manifest(b"#a\n#b\n\n");

        let deck = load_or_placeholder(&path);
        assert!(deck.is_empty());
        assert!(!deck.is_builtin());
    }

    #[test]
    fn test_load_keeps_manifest_deck_on_success() {
        let (_dir, path) = write_manifest(b"Editor,shots/editor.png\n");

        let deck = load_or_placeholder(&path);
        assert!(!deck.is_builtin());
        assert_eq!(deck.len(), 1);
    }

    // --- placeholder_deck tests ---

    #[test]
    fn test_placeholder_deck_is_fixed_and_nonempty() {
        let a = placeholder_deck("reason one".to_string());
        let b = placeholder_deck("reason two".to_string());

        assert_eq!(a.len(), 4);
        assert_eq!(a.slides, b.slides);
        match a.source {
            DeckSource::Builtin { reason } => assert_eq!(reason, "reason one"),
            other => panic!("unexpected source: {other:?}"),
        }
    }
}
