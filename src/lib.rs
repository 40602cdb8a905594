//! markdownify: batch conversion of office documents to Markdown
//!
//! Supported inputs: Word (`.docx`), PDF, Excel (`.xlsx`/`.xls`), and
//! plain text. One input file produces one `<output_dir>/<stem>.md`.
//!
//! The PDF path is the interesting part: a font-size profiler ranks the
//! document's distinct sizes into heading levels, a three-signal majority
//! vote classifies each layout block, and detected table regions render
//! as Markdown tables — all best-effort, with failures isolated per
//! block, per page, and per document.

pub mod cli;
pub mod convert;
pub mod diag;
pub mod docx;
pub mod markdown;
pub mod options;
pub mod pdf;
pub mod sheet;

pub use convert::{ConvertError, Converter, Format};
pub use diag::{ConsoleSink, DiagLevel, DiagnosticsSink, MemorySink, NullSink};
pub use markdown::{MarkdownDocument, MarkdownError};
pub use options::{ConvertOptions, OptionsError};
