//! Word (.docx) to Markdown conversion
//!
//! Streams `word/document.xml` out of the OOXML container. Paragraphs
//! styled `Heading N` become `#`-prefixed headings; tables are collected
//! in document order and appended after the body text, each rendered with
//! the shared table renderer. Nested tables are flattened into their
//! outer cell's text.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diag::DiagnosticsSink;
use crate::markdown::{render_table, MarkdownDocument};

/// Error type for DOCX conversion
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid OOXML container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Archive has no word/document.xml: {0}")]
    MissingDocument(PathBuf),
}

/// Marker emitted before each extracted table
const TABLE_MARKER: &str = "### Table";

/// Convert one `.docx` file into Markdown fragments
pub fn convert_docx(
    input: &Path,
    doc: &mut MarkdownDocument,
    sink: &dyn DiagnosticsSink,
) -> Result<(), DocxError> {
    let file = std::fs::File::open(input)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| DocxError::MissingDocument(input.to_path_buf()))?
        .read_to_string(&mut xml)?;

    let tables = parse_document_xml(&xml, doc)?;
    sink.info(&format!(
        "docx body parsed, {} table(s) extracted",
        tables.len()
    ));

    for grid in &tables {
        if let Some(rendered) = render_table(grid) {
            doc.push("");
            doc.push(TABLE_MARKER);
            doc.push(rendered);
        }
    }

    Ok(())
}

/// Walk the document XML, pushing paragraphs and collecting table grids
fn parse_document_xml(
    xml: &str,
    doc: &mut MarkdownDocument,
) -> Result<Vec<Vec<Vec<String>>>, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut tables = Vec::new();
    let mut table_depth = 0usize;
    let mut in_text = false;

    let mut para_text = String::new();
    let mut para_style: Option<String> = None;

    let mut current_table: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    para_text.clear();
                    para_style = None;
                }
                b"w:t" => in_text = true,
                b"w:tbl" => table_depth += 1,
                b"w:tr" if table_depth == 1 => current_row = Vec::new(),
                b"w:tc" if table_depth == 1 => current_cell = String::new(),
                b"w:pStyle" => {
                    para_style = attribute_value(&e, b"w:val");
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"w:pStyle" {
                    para_style = attribute_value(&e, b"w:val");
                }
            }
            Event::Text(t) => {
                if in_text {
                    para_text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if table_depth > 0 {
                        if !para_text.is_empty() {
                            if !current_cell.is_empty() {
                                current_cell.push(' ');
                            }
                            current_cell.push_str(&para_text);
                        }
                    } else {
                        doc.push(render_paragraph(&para_text, para_style.as_deref()));
                    }
                    para_text.clear();
                    para_style = None;
                }
                b"w:tc" if table_depth == 1 => {
                    current_row.push(std::mem::take(&mut current_cell));
                }
                b"w:tr" if table_depth == 1 => {
                    current_table.push(std::mem::take(&mut current_row));
                }
                b"w:tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 && !current_table.is_empty() {
                        tables.push(std::mem::take(&mut current_table));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tables)
}

fn render_paragraph(text: &str, style: Option<&str>) -> String {
    match style.and_then(heading_level) {
        Some(level) => format!("{} {}", "#".repeat(level as usize), text),
        None => text.to_string(),
    }
}

/// Heading level from a paragraph style id such as `Heading1` or `Heading 2`
fn heading_level(style: &str) -> Option<u8> {
    style
        .strip_prefix("Heading")
        .and_then(|rest| rest.trim().parse::<u8>().ok())
        .filter(|level| *level >= 1)
}

fn attribute_value(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
