//! Image file probing: existence, size, and header sniffing.
//!
//! The sniffer reads just enough of each file to recognize the container
//! format and pull pixel dimensions out of the header. It understands
//! PNG, GIF, BMP and JPEG; anything else is reported as found with no
//! format. Probing is read-only and never alters the deck.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use rayon::prelude::*;

use crate::types::{CheckReport, Deck, ImageFormat, ImageStatus, Slide, SlideCheck};

/// Upper bound on header bytes read per probe.
///
/// JPEG hides its frame header behind variable-length metadata segments;
/// a frame header past this window degrades to "format known, dimensions
/// unknown".
const SNIFF_LIMIT: u64 = 256 * 1024;

/// Probe one image file.
pub fn probe_image(path: &Path) -> ImageStatus {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ImageStatus::Missing,
        Err(e) => return ImageStatus::Unreadable(e.to_string()),
    };
    if !metadata.is_file() {
        return ImageStatus::Unreadable("not a regular file".to_string());
    }

    let mut header = Vec::new();
    match File::open(path) {
        Ok(file) => {
            if let Err(e) = file.take(SNIFF_LIMIT).read_to_end(&mut header) {
                return ImageStatus::Unreadable(e.to_string());
            }
        }
        Err(e) => return ImageStatus::Unreadable(e.to_string()),
    }

    match sniff(&header) {
        Some((format, dimensions)) => ImageStatus::Found {
            bytes: metadata.len(),
            format: Some(format),
            dimensions,
        },
        None => ImageStatus::Found {
            bytes: metadata.len(),
            format: None,
            dimensions: None,
        },
    }
}

/// Probe the image behind one slide.
pub fn probe_slide(slide: &Slide) -> SlideCheck {
    SlideCheck {
        caption: slide.caption.clone(),
        image: slide.image.clone(),
        status: probe_image(&slide.image),
    }
}

/// Probe every slide in parallel, preserving deck order.
pub fn inspect_deck(deck: &Deck) -> CheckReport {
    let entries: Vec<SlideCheck> = deck.slides.par_iter().map(probe_slide).collect();
    summarize(entries)
}

/// Fold per-slide outcomes into a report with counts.
pub fn summarize(entries: Vec<SlideCheck>) -> CheckReport {
    let mut report = CheckReport {
        entries,
        ..Default::default()
    };

    for entry in &report.entries {
        match &entry.status {
            ImageStatus::Found { bytes, .. } => {
                report.found += 1;
                report.bytes_total += bytes;
            }
            ImageStatus::Missing => report.missing += 1,
            ImageStatus::Unreadable(_) => report.unreadable += 1,
        }
    }

    report
}

// ============================================================================
// INTERNAL: header sniffing
// ============================================================================

/// Recognize the container format and extract dimensions from a header.
fn sniff(header: &[u8]) -> Option<(ImageFormat, Option<(u32, u32)>)> {
    if header.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some((ImageFormat::Png, png_dimensions(header)));
    }
    if header.starts_with(b"GIF87a") || header.starts_with(b"GIF89a") {
        return Some((ImageFormat::Gif, gif_dimensions(header)));
    }
    if header.starts_with(b"BM") {
        return Some((ImageFormat::Bmp, bmp_dimensions(header)));
    }
    if header.starts_with(&[0xff, 0xd8, 0xff]) {
        return Some((ImageFormat::Jpeg, jpeg_dimensions(header)));
    }
    None
}

/// PNG: IHDR directly follows the signature; width and height are
/// big-endian u32 at offsets 16 and 20.
fn png_dimensions(header: &[u8]) -> Option<(u32, u32)> {
    if header.len() < 24 || &header[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(header[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(header[20..24].try_into().ok()?);
    Some((width, height))
}

/// GIF: logical screen width and height are little-endian u16 at
/// offsets 6 and 8.
fn gif_dimensions(header: &[u8]) -> Option<(u32, u32)> {
    if header.len() < 10 {
        return None;
    }
    let width = u16::from_le_bytes([header[6], header[7]]) as u32;
    let height = u16::from_le_bytes([header[8], header[9]]) as u32;
    Some((width, height))
}

/// BMP: BITMAPINFOHEADER stores signed little-endian width/height at
/// offsets 18 and 22; height is negative for top-down bitmaps.
fn bmp_dimensions(header: &[u8]) -> Option<(u32, u32)> {
    if header.len() < 26 {
        return None;
    }
    let width = i32::from_le_bytes(header[18..22].try_into().ok()?);
    let height = i32::from_le_bytes(header[22..26].try_into().ok()?);
    Some((width.unsigned_abs(), height.unsigned_abs()))
}

/// JPEG: walk marker segments until a start-of-frame marker; its payload
/// carries height then width as big-endian u16 after the precision byte.
fn jpeg_dimensions(header: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 2; // past SOI

    while pos + 4 <= header.len() {
        if header[pos] != 0xff {
            return None; // lost marker sync
        }
        let marker = header[pos + 1];

        // Fill bytes before a marker.
        if marker == 0xff {
            pos += 1;
            continue;
        }
        // Standalone markers (TEM, RST0-7, SOI, EOI) carry no length.
        if marker == 0x01 || (0xd0..=0xd9).contains(&marker) {
            pos += 2;
            continue;
        }

        let len = u16::from_be_bytes([header[pos + 2], header[pos + 3]]) as usize;
        if len < 2 {
            return None;
        }

        if is_sof_marker(marker) {
            let payload = header.get(pos + 4..pos + 2 + len)?;
            if payload.len() < 5 {
                return None;
            }
            let height = u16::from_be_bytes([payload[1], payload[2]]) as u32;
            let width = u16::from_be_bytes([payload[3], payload[4]]) as u32;
            return Some((width, height));
        }

        pos += 2 + len;
    }

    None
}

/// SOF0-SOF15, excluding the non-frame markers in that range
/// (DHT 0xc4, JPG 0xc8, DAC 0xcc).
fn is_sof_marker(marker: u8) -> bool {
    matches!(marker, 0xc0..=0xcf) && !matches!(marker, 0xc4 | 0xc8 | 0xcc)
}

// ============================================================================
// TESTS
// ============================================================================
