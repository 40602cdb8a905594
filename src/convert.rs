//! Format dispatch and output
//!
//! Resolves the input format from the file extension, runs the matching
//! converter, and writes the assembled Markdown in one pass. An unknown
//! extension fails hard before any output is written.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diag::DiagnosticsSink;
use crate::docx::{convert_docx, DocxError};
use crate::markdown::{MarkdownDocument, MarkdownError};
use crate::options::ConvertOptions;
use crate::pdf::{convert_document, LopdfLayoutEngine, PdfError};
use crate::sheet::{convert_workbook, SheetError};

/// Error type for a single file conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("PDF conversion failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX conversion failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Workbook conversion failed: {0}")]
    Sheet(#[from] SheetError),

    #[error("Output error: {0}")]
    Output(#[from] MarkdownError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Docx,
    Pdf,
    Excel,
    Text,
}

impl Format {
    /// Resolve the format from a lowercased file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(Format::Docx),
            "pdf" => Some(Format::Pdf),
            "xlsx" | "xls" => Some(Format::Excel),
            "txt" => Some(Format::Text),
            _ => None,
        }
    }
}

/// One-file-in, one-file-out converter
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert a single document to `<output_dir>/<stem>.md`
    ///
    /// Overwrites any existing file at the target path; the output
    /// directory is created if absent.
    pub fn convert_file(
        &self,
        input: &Path,
        sink: &dyn DiagnosticsSink,
    ) -> Result<PathBuf, ConvertError> {
        let format = Format::from_path(input)
            .ok_or_else(|| ConvertError::UnsupportedFormat(input.to_path_buf()))?;

        let mut doc = MarkdownDocument::new();
        match format {
            Format::Docx => convert_docx(input, &mut doc, sink)?,
            Format::Pdf => {
                let engine = LopdfLayoutEngine::open(input)?;
                let stats = convert_document(&engine, &self.options, &mut doc, sink);
                sink.info(&format!(
                    "pdf: {} pages, {} blocks ({} headings), {} tables, {} blocks skipped",
                    stats.pages, stats.blocks, stats.headings, stats.tables, stats.skipped_blocks
                ));
            }
            Format::Excel => convert_workbook(input, &mut doc, sink)?,
            Format::Text => doc.push(std::fs::read_to_string(input)?),
        }

        let output_path = doc.save(input, &self.options.output_dir())?;
        sink.info(&format!("wrote {}", output_path.display()));
        Ok(output_path)
    }
}
