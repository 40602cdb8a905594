//! Heading classification
//!
//! Decides whether a text block is a heading using three independent
//! signals with a majority vote: font-size rank, horizontal centering, and
//! all-uppercase text. The classifier is a pure function over the block,
//! the document's font-size map, and the page width.

use super::font_profile::{FontSizeMap, MAX_HEADING_LEVEL};
use super::types::{BoundingBox, TextBlock};

/// Tolerance in page units for the centering signal (exclusive)
pub const CENTER_TOLERANCE: f64 = 50.0;

/// Outcome of classifying one text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Ordinary body text
    Body,
    /// Heading at the given Markdown depth
    ///
    /// Level 0 means the block was voted in by centering and case alone;
    /// it renders with zero hash marks.
    Heading { level: u8 },
}

/// Classify one block against the document's font-size ranking
///
/// A block is a heading when at least two of three signals hold:
/// font rank (first character's size maps to level > 0), centering
/// (bbox center within `CENTER_TOLERANCE` of the page's horizontal
/// center), and uppercase (trimmed text is entirely uppercase). A block
/// with no character records can only satisfy the latter two.
pub fn classify_block(block: &TextBlock, sizes: &FontSizeMap, page_width: f64) -> Classification {
    let level = block
        .first_char_size()
        .map(|size| sizes.level_for(size))
        .unwrap_or(0);

    let font_signal = level > 0;
    let center_signal = is_centered(&block.bbox, page_width);
    let case_signal = is_all_uppercase(block.text.trim());

    let votes = font_signal as u8 + center_signal as u8 + case_signal as u8;
    if votes >= 2 {
        Classification::Heading {
            level: level.min(MAX_HEADING_LEVEL),
        }
    } else {
        Classification::Body
    }
}

/// True when the box's horizontal center falls strictly within the
/// tolerance of the page's horizontal center
fn is_centered(bbox: &BoundingBox, page_width: f64) -> bool {
    (bbox.center_x() - page_width / 2.0).abs() < CENTER_TOLERANCE
}

/// True when the text contains at least one cased character and no
/// lowercase characters
fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
