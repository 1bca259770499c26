//! Manifest parsing: CSV text to slide records.
//!
//! Pure functions, no I/O. The field splitter implements the simplified
//! quoting the manifest format is defined with: a double quote toggles
//! quoted mode and is dropped, commas inside quotes are literal content,
//! and there are no escape sequences or error cases. This is intentionally
//! NOT RFC 4180; malformed quoting degrades to best-effort splitting.

use std::path::PathBuf;

use crate::types::Slide;

/// Lines starting with this character (no leading whitespace) are skipped.
const COMMENT_PREFIX: char = '#';

/// Split one manifest line into fields on unquoted commas.
///
/// A `"` toggles quoted mode and is consumed, never emitted. Always
/// yields at least one field: the trailing buffer is pushed
/// unconditionally, so an empty line yields `[""]`. An unterminated
/// quote swallows the rest of the line into the final field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Parse manifest text into slide records.
///
/// # Line rules
/// - Lines empty after trimming are skipped.
/// - Lines starting with `#` in column zero are skipped; an indented `#`
///   is data, not a comment.
/// - Remaining lines are split via [`split_fields`]; a line survives only
///   if it has at least two fields and the first two are non-empty after
///   trimming. Fields beyond the second are ignored.
///
/// Order is preserved and duplicates are kept.
pub fn parse_slides(text: &str) -> Vec<Slide> {
    let mut slides = Vec::new();

    for raw in text.lines() {
        if raw.trim().is_empty() || raw.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let fields = split_fields(raw);
        if fields.len() < 2 {
            continue;
        }

        let caption = fields[0].trim();
        let image = fields[1].trim();
        if caption.is_empty() || image.is_empty() {
            continue;
        }

        slides.push(Slide {
            caption: caption.to_string(),
            image: PathBuf::from(image),
        });
    }

    slides
}

// ============================================================================
// TESTS
// ============================================================================
