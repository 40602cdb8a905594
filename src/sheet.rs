//! Excel (.xlsx/.xls) to Markdown conversion
//!
//! Reads every worksheet through calamine and renders each cell grid as a
//! Markdown table, first row as header. A sheet that fails to read is
//! logged and skipped; the remaining sheets still convert.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use thiserror::Error;

use crate::diag::DiagnosticsSink;
use crate::markdown::{render_table, MarkdownDocument};

/// Error type for workbook conversion
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
}

/// Convert one workbook into Markdown fragments
pub fn convert_workbook(
    input: &Path,
    doc: &mut MarkdownDocument,
    sink: &dyn DiagnosticsSink,
) -> Result<(), SheetError> {
    let mut workbook = open_workbook_auto(input)?;
    let sheet_names = workbook.sheet_names().to_owned();

    doc.push("## Workbook conversion");

    for name in sheet_names {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                sink.warn(&format!("sheet '{name}' failed to read: {e}"));
                continue;
            }
        };

        doc.push("");
        doc.push(format!("### Sheet: {name}"));

        let grid = grid_from_rows(range.rows());
        if let Some(rendered) = render_table(&grid) {
            doc.push(rendered);
        }
    }

    Ok(())
}

/// Stringify calamine rows into the shared cell-grid shape
fn grid_from_rows<'a>(rows: impl Iterator<Item = &'a [Data]>) -> Vec<Vec<String>> {
    rows.map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
