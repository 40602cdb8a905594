//! PDF to Markdown conversion loop
//!
//! Drives a [`LayoutEngine`] page by page: classified text blocks first,
//! then that page's tables, appended to the shared document in order.
//! Failures are isolated at three tiers — block, page, and document-wide
//! font scan — so a single malformed region never aborts the conversion.

use crate::diag::DiagnosticsSink;
use crate::markdown::{body_fragment, heading_fragment, render_table, MarkdownDocument};
use crate::options::ConvertOptions;

use super::font_profile::FontSizeMap;
use super::heading::{classify_block, Classification};
use super::types::{LayoutEngine, TextBlock};

/// Counters for one PDF conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Pages visited
    pub pages: usize,
    /// Blocks rendered (headings + body lines)
    pub blocks: usize,
    /// Blocks rendered as headings
    pub headings: usize,
    /// Tables rendered
    pub tables: usize,
    /// Blocks skipped (empty text or malformed geometry)
    pub skipped_blocks: usize,
    /// Pages whose layout extraction failed
    pub failed_pages: usize,
    /// Pages whose table extraction failed
    pub failed_tables: usize,
}

/// Outcome of processing one text block
enum BlockOutcome {
    Rendered(String, bool),
    Skipped(Option<String>),
}

/// Convert a whole document through the given engine into `doc`
///
/// Never fails once the engine is open: every recoverable problem is
/// reported to the sink and skipped.
pub fn convert_document<E: LayoutEngine>(
    engine: &E,
    options: &ConvertOptions,
    doc: &mut MarkdownDocument,
    sink: &dyn DiagnosticsSink,
) -> ConversionStats {
    let mut stats = ConversionStats::default();

    // Tier 3: document-wide font scan, degraded on failure
    let sizes = match engine.font_sizes() {
        Ok(sizes) => FontSizeMap::from_sizes(&sizes),
        Err(e) => {
            sink.warn(&format!("font analysis failed: {e}"));
            FontSizeMap::empty()
        }
    };

    let mut page_count = engine.page_count();
    if let Some(max_pages) = options.max_pages {
        if page_count > max_pages {
            sink.info(&format!("limiting conversion to {max_pages} pages"));
            page_count = max_pages;
        }
    }

    for page_index in 0..page_count {
        stats.pages += 1;

        // Tier 2a: layout extraction; a failure skips the page's text but
        // table extraction below still runs.
        match engine.page_layout(page_index) {
            Ok(layout) => {
                for block in &layout.blocks {
                    match process_block(block, &sizes, layout.width) {
                        BlockOutcome::Rendered(fragment, is_heading) => {
                            doc.push(fragment);
                            stats.blocks += 1;
                            if is_heading {
                                stats.headings += 1;
                            }
                        }
                        BlockOutcome::Skipped(reason) => {
                            stats.skipped_blocks += 1;
                            if let Some(reason) = reason {
                                sink.warn(&format!(
                                    "page {}: block skipped: {reason}",
                                    page_index + 1
                                ));
                            }
                        }
                    }
                }
            }
            Err(e) => {
                stats.failed_pages += 1;
                sink.warn(&format!("page {} layout failed: {e}", page_index + 1));
            }
        }

        // Tier 2b: table extraction, independent of the text outcome
        match engine.page_tables(page_index) {
            Ok(tables) => {
                for grid in &tables {
                    if let Some(rendered) = render_table(grid) {
                        doc.push(rendered);
                        stats.tables += 1;
                    }
                }
            }
            Err(e) => {
                stats.failed_tables += 1;
                sink.warn(&format!("page {} tables failed: {e}", page_index + 1));
            }
        }
    }

    stats
}

/// Tier 1: classify and render one block, or skip it
fn process_block(block: &TextBlock, sizes: &FontSizeMap, page_width: f64) -> BlockOutcome {
    let text = block.text.trim();
    if text.is_empty() {
        // Whitespace-only blocks contribute no output and no diagnostic
        return BlockOutcome::Skipped(None);
    }
    if !block.bbox.is_finite() || !page_width.is_finite() {
        return BlockOutcome::Skipped(Some("non-finite geometry".to_string()));
    }

    match classify_block(block, sizes, page_width) {
        Classification::Heading { level } => {
            BlockOutcome::Rendered(heading_fragment(level, text), true)
        }
        Classification::Body => BlockOutcome::Rendered(body_fragment(text), false),
    }
}
