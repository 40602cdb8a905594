//! PDF layout core types
//!
//! Data structures exchanged between the layout engine, the heading
//! classifier, and the per-page conversion loop.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// PDF conversion error types
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    Open(PathBuf),

    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("Font scan failed: {0}")]
    FontScan(String),

    #[error("Layout extraction failed on page {page}: {reason}")]
    Layout { page: usize, reason: String },

    #[error("Table extraction failed on page {page}: {reason}")]
    Table { page: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Axis-aligned bounding box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal center of the box
    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// True when all four coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

/// One character as reported by the layout engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharRecord {
    pub ch: char,
    /// Font size in points
    pub font_size: f64,
}

impl CharRecord {
    pub fn new(ch: char, font_size: f64) -> Self {
        Self { ch, font_size }
    }
}

/// One line/paragraph-like unit on a page
///
/// Produced by the layout engine, consumed once by the heading classifier.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    /// Raw text of the block
    pub text: String,
    /// Bounding box in page coordinates
    pub bbox: BoundingBox,
    /// Constituent characters with font metadata
    pub chars: Vec<CharRecord>,
}

impl TextBlock {
    /// Font size of the first character, if any
    pub fn first_char_size(&self) -> Option<f64> {
        self.chars.first().map(|c| c.font_size)
    }
}

/// Geometry and text blocks of one page
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Text blocks in reading order
    pub blocks: Vec<TextBlock>,
}

/// Raw table region: rows of cell strings, first row = header
pub type TableGrid = Vec<Vec<String>>;

// ============================================================
// Layout Engine Seam
// ============================================================

/// Source of page geometry, character-level font metadata, and table regions
///
/// This is the boundary to the upstream PDF layout machinery: the converter
/// only consumes per-page text blocks and raw cell grids through this trait.
/// Tests drive the pipeline with in-memory fakes.
pub trait LayoutEngine {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// All font sizes observed anywhere in the document
    ///
    /// Feeds the font-size profiler. A failure here degrades heading
    /// detection but never aborts the conversion.
    fn font_sizes(&self) -> Result<Vec<f64>>;

    /// Text blocks and dimensions for one page (0-indexed)
    fn page_layout(&self, page_index: usize) -> Result<PageLayout>;

    /// Detected table regions for one page (0-indexed)
    fn page_tables(&self, page_index: usize) -> Result<Vec<TableGrid>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_center() {
        let bbox = BoundingBox::new(10.0, 0.0, 30.0, 12.0);
        assert_eq!(bbox.center_x(), 20.0);
        assert_eq!(bbox.width(), 20.0);
        assert_eq!(bbox.height(), 12.0);
    }

    #[test]
    fn test_bounding_box_finite() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn test_text_block_first_char_size() {
        let block = TextBlock {
            text: "ab".into(),
            bbox: BoundingBox::default(),
            chars: vec![CharRecord::new('a', 14.0), CharRecord::new('b', 10.0)],
        };
        assert_eq!(block.first_char_size(), Some(14.0));
        assert_eq!(TextBlock::default().first_char_size(), None);
    }
}
