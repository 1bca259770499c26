//! Output formatting for the headless commands.
//!
//! Pure functions: (data, OutputFormat) -> String. No I/O, no side
//! effects.

use humansize::{format_size, BINARY};

use crate::types::{CheckReport, Deck, ImageStatus, OutputFormat};

/// Format the parsed deck for `list`.
pub fn format_listing(deck: &Deck, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_listing_human(deck),
        OutputFormat::Json => format_listing_json(deck),
    }
}

/// Format probe results for `check`.
pub fn format_check(report: &CheckReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_check_human(report),
        OutputFormat::Json => format_check_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_listing_human(deck: &Deck) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Slides ({}) ===\n", deck.len()));
    if deck.is_empty() {
        out.push_str("  (no slides)\n");
        return out;
    }

    let width = deck
        .slides
        .iter()
        .map(|s| s.caption.chars().count())
        .max()
        .unwrap_or(0);

    for (i, slide) in deck.slides.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}. {:<width$}  {}\n",
            i + 1,
            slide.caption,
            slide.image.display(),
        ));
    }

    out
}

fn format_check_human(report: &CheckReport) -> String {
    let mut out = String::new();

    // Missing images
    if report.missing > 0 {
        out.push_str("=== Missing Images ===\n");
        for entry in &report.entries {
            if entry.status == ImageStatus::Missing {
                out.push_str(&format!(
                    "  {}  ({})\n",
                    entry.image.display(),
                    entry.caption
                ));
            }
        }
        out.push('\n');
    }

    // Unreadable images
    if report.unreadable > 0 {
        out.push_str("=== Unreadable Images ===\n");
        for entry in &report.entries {
            if let ImageStatus::Unreadable(reason) = &entry.status {
                out.push_str(&format!(
                    "  {}  ({}) - {}\n",
                    entry.image.display(),
                    entry.caption,
                    reason
                ));
            }
        }
        out.push('\n');
    }

    // Summary
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Slides:     {}\n", report.entries.len()));
    out.push_str(&format!("Found:      {}\n", report.found));
    out.push_str(&format!("Missing:    {}\n", report.missing));
    out.push_str(&format!("Unreadable: {}\n", report.unreadable));
    out.push_str(&format!(
        "Image data: {}\n",
        format_size(report.bytes_total, BINARY)
    ));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_listing_json(deck: &Deck) -> String {
    serde_json::to_string_pretty(&deck.slides).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize listing to JSON: {}", e)
    })
}

fn format_check_json(report: &CheckReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize check report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::summarize;
    use crate::types::{DeckSource, ImageFormat, Slide, SlideCheck};
    use std::path::PathBuf;

    fn sample_deck() -> Deck {
        Deck {
            slides: vec![
                Slide {
                    caption: "Editor view".to_string(),
                    image: PathBuf::from("shots/editor.png"),
                },
                Slide {
                    caption: "Search".to_string(),
                    image: PathBuf::from("shots/search.png"),
                },
            ],
            source: DeckSource::Manifest(PathBuf::from("images.csv")),
        }
    }

    fn sample_check() -> CheckReport {
        summarize(vec![
            SlideCheck {
                caption: "Editor view".to_string(),
                image: PathBuf::from("shots/editor.png"),
                status: ImageStatus::Found {
                    bytes: 1024 * 1024 * 2, // 2 MiB
                    format: Some(ImageFormat::Png),
                    dimensions: Some((1280, 800)),
                },
            },
            SlideCheck {
                caption: "Search".to_string(),
                image: PathBuf::from("shots/gone.png"),
                status: ImageStatus::Missing,
            },
            SlideCheck {
                caption: "Login".to_string(),
                image: PathBuf::from("shots/locked.png"),
                status: ImageStatus::Unreadable("permission denied".to_string()),
            },
        ])
    }

    // --- Listing tests ---

    #[test]
    fn listing_human_numbers_slides_in_order() {
        let output = format_listing(&sample_deck(), OutputFormat::Human);

        assert!(output.contains("=== Slides (2) ==="));
        assert!(output.contains("1. Editor view"));
        assert!(output.contains("2. Search"));
        assert!(output.contains("shots/editor.png"));
    }

    #[test]
    fn listing_human_empty_deck() {
        let deck = Deck {
            slides: Vec::new(),
            source: DeckSource::Manifest(PathBuf::from("images.csv")),
        };
        let output = format_listing(&deck, OutputFormat::Human);

        assert!(output.contains("=== Slides (0) ==="));
        assert!(output.contains("(no slides)"));
    }

    #[test]
    fn listing_json_is_an_array_of_slides() {
        let output = format_listing(&sample_deck(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["caption"], "Editor view");
        assert_eq!(parsed[1]["image"], "shots/search.png");
    }

    // --- Check tests ---

    #[test]
    fn check_human_lists_problems() {
        let output = format_check(&sample_check(), OutputFormat::Human);

        assert!(output.contains("=== Missing Images ==="));
        assert!(output.contains("shots/gone.png"));
        assert!(output.contains("=== Unreadable Images ==="));
        assert!(output.contains("permission denied"));
    }

    #[test]
    fn check_human_includes_summary() {
        let output = format_check(&sample_check(), OutputFormat::Human);

        assert!(output.contains("=== Summary ==="));
        assert!(output.contains("Slides:     3"));
        assert!(output.contains("Found:      1"));
        assert!(output.contains("Missing:    1"));
        assert!(output.contains("Unreadable: 1"));
        assert!(output.contains("2 MiB")); // humansize output
    }

    #[test]
    fn check_human_clean_report_has_only_summary() {
        let report = summarize(vec![SlideCheck {
            caption: "Editor view".to_string(),
            image: PathBuf::from("shots/editor.png"),
            status: ImageStatus::Found {
                bytes: 10,
                format: None,
                dimensions: None,
            },
        }]);
        let output = format_check(&report, OutputFormat::Human);

        assert!(!output.contains("=== Missing Images"));
        assert!(!output.contains("=== Unreadable Images"));
        assert!(output.contains("=== Summary ==="));
    }

    #[test]
    fn check_json_is_valid_json_with_entries() {
        let output = format_check(&sample_check(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert!(parsed["entries"].is_array());
        assert_eq!(parsed["entries"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["found"], 1);
        assert_eq!(parsed["missing"], 1);
        assert_eq!(parsed["unreadable"], 1);
        assert_eq!(parsed["entries"][1]["status"], "Missing");
        assert_eq!(
            parsed["entries"][0]["status"]["Found"]["dimensions"][0],
            1280
        );
    }
}
