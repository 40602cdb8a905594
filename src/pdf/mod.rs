//! PDF to Markdown conversion
//!
//! A single forward pipeline: the font-size profiler ranks the document's
//! distinct sizes, the heading classifier votes per block, tables render
//! independently per page, and the assembler receives everything in
//! page-then-block order. Strictly sequential, best-effort throughout.

mod convert;
mod font_profile;
mod heading;
mod lopdf_engine;
mod types;

pub use convert::{convert_document, ConversionStats};
pub use font_profile::{FontSizeMap, MAX_HEADING_LEVEL, MAX_RANKED_SIZES};
pub use heading::{classify_block, Classification, CENTER_TOLERANCE};
pub use lopdf_engine::LopdfLayoutEngine;
pub use types::{
    BoundingBox, CharRecord, LayoutEngine, PageLayout, PdfError, TableGrid, TextBlock,
};
