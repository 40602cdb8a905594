//! Markdown assembly
//!
//! Collects rendered fragments in page/block order and writes them out in
//! one pass. Fragments are append-only; the document is joined with
//! newlines exactly once at the end.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for writing assembled Markdown
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input path has no file stem: {0}")]
    NoFileStem(PathBuf),
}

/// Ordered, append-only sequence of Markdown fragments
#[derive(Debug, Default)]
pub struct MarkdownDocument {
    fragments: Vec<String>,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Join all fragments with newlines
    pub fn render(&self) -> String {
        self.fragments.join("\n")
    }

    /// Write the rendered document to `<output_dir>/<input stem>.md`
    ///
    /// Creates the output directory if absent and overwrites any existing
    /// file at the target path.
    pub fn save(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, MarkdownError> {
        let stem = input
            .file_stem()
            .ok_or_else(|| MarkdownError::NoFileStem(input.to_path_buf()))?;
        std::fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(format!("{}.md", stem.to_string_lossy()));
        std::fs::write(&output_path, self.render())?;
        Ok(output_path)
    }
}

/// Render a heading fragment with the given level
///
/// Level 0 produces a bare line with no hash marks: a block voted in as a
/// heading by centering and case alone carries no font-derived depth.
pub fn heading_fragment(level: u8, text: &str) -> String {
    format!("\n{} {}\n", "#".repeat(level as usize), text)
}

/// Render a body-text fragment with a trailing hard break
pub fn body_fragment(text: &str) -> String {
    format!("{}  ", text)
}

/// Render a cell grid as a Markdown table
///
/// The first row is the header, followed by a `---` separator per column,
/// then the data rows. A grid with zero rows renders nothing.
pub fn render_table(grid: &[Vec<String>]) -> Option<String> {
    let (header, rows) = grid.split_first()?;

    let mut lines = Vec::with_capacity(grid.len() + 1);
    lines.push(render_row(header));
    lines.push(format!("| {} |", vec!["---"; header.len()].join(" | ")));
    for row in rows {
        lines.push(render_row(row));
    }
    Some(lines.join("\n"))
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_render_table_exact_shape() {
        let table = grid(&[&["A", "B"], &["1", "2"]]);
        let rendered = render_table(&table).unwrap();
        assert_eq!(rendered, "| A | B |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn test_render_table_empty_grid() {
        assert!(render_table(&[]).is_none());
    }

    #[test]
    fn test_render_table_header_only() {
        let table = grid(&[&["X", "Y", "Z"]]);
        let rendered = render_table(&table).unwrap();
        assert_eq!(rendered, "| X | Y | Z |\n| --- | --- | --- |");
    }

    #[test]
    fn test_heading_fragment_levels() {
        assert_eq!(heading_fragment(1, "Title"), "\n# Title\n");
        assert_eq!(heading_fragment(3, "Sub"), "\n### Sub\n");
        // Level 0: no hash marks, leading space kept
        assert_eq!(heading_fragment(0, "BARE"), "\n BARE\n");
    }

    #[test]
    fn test_body_fragment_hard_break() {
        assert_eq!(body_fragment("line"), "line  ");
    }

    #[test]
    fn test_document_render_joins_with_newlines() {
        let mut doc = MarkdownDocument::new();
        doc.push("one");
        doc.push("two");
        assert_eq!(doc.render(), "one\ntwo");
        assert_eq!(doc.len(), 2);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_document_save_creates_dir_and_overwrites() {
        let tmpdir = tempfile::tempdir().unwrap();
        let out_dir = tmpdir.path().join("nested").join("out");

        let mut doc = MarkdownDocument::new();
        doc.push("content");

        let path = doc.save(Path::new("report.pdf"), &out_dir).unwrap();
        assert_eq!(path, out_dir.join("report.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");

        // Overwrite is deterministic
        let mut doc2 = MarkdownDocument::new();
        doc2.push("replaced");
        let path2 = doc2.save(Path::new("report.pdf"), &out_dir).unwrap();
        assert_eq!(path2, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "replaced");
    }
}
