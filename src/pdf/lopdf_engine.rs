//! Built-in layout backend on lopdf
//!
//! A deliberately small content-stream interpreter: it tracks the text
//! matrix and font size through BT/ET, Tf, Td/TD/Tm/T*, and the
//! text-showing operators, then groups the recovered runs into lines by
//! baseline. Good enough for simple byte-encoded fonts; CID-keyed fonts
//! come out garbled and table regions are not detected — richer engines
//! plug in behind [`LayoutEngine`].
//!
//! [`LayoutEngine`]: super::types::LayoutEngine

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

use super::types::{
    BoundingBox, CharRecord, LayoutEngine, PageLayout, PdfError, Result, TableGrid, TextBlock,
};

/// Runs closer than this on the baseline axis belong to the same line
const LINE_TOLERANCE: f64 = 2.0;

/// Rough advance per glyph as a fraction of the font size
const GLYPH_ADVANCE_RATIO: f64 = 0.5;

/// Font size assumed before the first Tf operator
const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Fallback page dimensions (US Letter) when no MediaBox is found
const FALLBACK_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// One uninterrupted piece of shown text with its position and font size
#[derive(Debug, Clone)]
struct TextRun {
    x: f64,
    y: f64,
    size: f64,
    text: String,
}

/// Layout engine backed by a loaded lopdf document
pub struct LopdfLayoutEngine {
    doc: Document,
    /// Page object ids in document order
    pages: Vec<ObjectId>,
}

impl LopdfLayoutEngine {
    /// Load a PDF from disk
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path).map_err(|_| PdfError::Open(path.to_path_buf()))?;
        let pages = doc.get_pages().into_values().collect();
        Ok(Self { doc, pages })
    }

    fn page_id(&self, page_index: usize) -> Result<ObjectId> {
        self.pages
            .get(page_index)
            .copied()
            .ok_or_else(|| PdfError::Layout {
                page: page_index,
                reason: "page index out of range".to_string(),
            })
    }

    fn runs_for_page(&self, page_id: ObjectId) -> std::result::Result<Vec<TextRun>, lopdf::Error> {
        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;
        Ok(collect_runs(&content))
    }

    /// Page dimensions from the MediaBox, walking Parent nodes for
    /// inherited values
    fn page_dimensions(&self, page_id: ObjectId) -> (f64, f64) {
        let mut current = page_id;
        for _ in 0..16 {
            let Ok(dict) = self.doc.get_object(current).and_then(|o| o.as_dict()) else {
                break;
            };
            if let Ok(media_box) = dict.get(b"MediaBox").and_then(|o| o.as_array()) {
                let coords: Vec<f64> = media_box.iter().filter_map(number).collect();
                if coords.len() == 4 {
                    return ((coords[2] - coords[0]).abs(), (coords[3] - coords[1]).abs());
                }
            }
            match dict.get(b"Parent").and_then(|o| o.as_reference()) {
                Ok(parent) => current = parent,
                Err(_) => break,
            }
        }
        FALLBACK_PAGE_SIZE
    }
}

impl LayoutEngine for LopdfLayoutEngine {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn font_sizes(&self) -> Result<Vec<f64>> {
        let mut sizes = Vec::new();
        for page_id in &self.pages {
            let runs = self
                .runs_for_page(*page_id)
                .map_err(|e| PdfError::FontScan(e.to_string()))?;
            for run in &runs {
                sizes.extend(std::iter::repeat(run.size).take(run.text.chars().count()));
            }
        }
        Ok(sizes)
    }

    fn page_layout(&self, page_index: usize) -> Result<PageLayout> {
        let page_id = self.page_id(page_index)?;
        let (width, height) = self.page_dimensions(page_id);
        let runs = self.runs_for_page(page_id).map_err(|e| PdfError::Layout {
            page: page_index,
            reason: e.to_string(),
        })?;
        Ok(PageLayout {
            width,
            height,
            blocks: group_into_lines(runs),
        })
    }

    fn page_tables(&self, page_index: usize) -> Result<Vec<TableGrid>> {
        self.page_id(page_index)?;
        // Line-art based table detection is left to richer engines
        Ok(Vec::new())
    }
}

/// Interpret text-positioning and text-showing operators into runs
fn collect_runs(content: &Content) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut size = DEFAULT_FONT_SIZE;
    let mut leading = 0.0;
    // Current position and start-of-line position
    let mut cursor = (0.0, 0.0);
    let mut line_start = (0.0, 0.0);

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                cursor = (0.0, 0.0);
                line_start = (0.0, 0.0);
            }
            "Tf" => {
                if let Some(s) = operands.get(1).and_then(number) {
                    size = s;
                }
            }
            "TL" => {
                if let Some(l) = operands.first().and_then(number) {
                    leading = l;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(number),
                    operands.get(1).and_then(number),
                ) {
                    line_start = (line_start.0 + tx, line_start.1 + ty);
                    cursor = line_start;
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(number),
                    operands.get(1).and_then(number),
                ) {
                    leading = -ty;
                    line_start = (line_start.0 + tx, line_start.1 + ty);
                    cursor = line_start;
                }
            }
            "Tm" => {
                if let (Some(e), Some(f)) = (
                    operands.get(4).and_then(number),
                    operands.get(5).and_then(number),
                ) {
                    line_start = (e, f);
                    cursor = line_start;
                }
            }
            "T*" => {
                line_start.1 -= leading;
                cursor = line_start;
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_run(&mut runs, &mut cursor, size, bytes);
                }
            }
            "'" => {
                line_start.1 -= leading;
                cursor = line_start;
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_run(&mut runs, &mut cursor, size, bytes);
                }
            }
            "\"" => {
                line_start.1 -= leading;
                cursor = line_start;
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    push_run(&mut runs, &mut cursor, size, bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = operands.first() {
                    for part in parts {
                        match part {
                            Object::String(bytes, _) => {
                                push_run(&mut runs, &mut cursor, size, bytes);
                            }
                            // Negative adjustments move the cursor right
                            _ => {
                                if let Some(adjust) = number(part) {
                                    cursor.0 -= adjust / 1000.0 * size;
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    runs
}

/// Append one shown string as a run and advance the cursor
fn push_run(runs: &mut Vec<TextRun>, cursor: &mut (f64, f64), size: f64, bytes: &[u8]) {
    let text = decode_text(bytes);
    if text.is_empty() {
        return;
    }
    let advance = text.chars().count() as f64 * size * GLYPH_ADVANCE_RATIO;
    runs.push(TextRun {
        x: cursor.0,
        y: cursor.1,
        size,
        text,
    });
    cursor.0 += advance;
}

/// Best-effort decoding for simple byte-encoded fonts
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

/// Numeric operand value, integer or real
fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Group runs into line-level text blocks by baseline proximity
///
/// PDF origin is bottom-left, so lines are ordered top-down by descending
/// y, then left-to-right within a line.
fn group_into_lines(mut runs: Vec<TextRun>) -> Vec<TextBlock> {
    runs.retain(|r| r.x.is_finite() && r.y.is_finite());
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut blocks = Vec::new();
    let mut line: Vec<TextRun> = Vec::new();

    for run in runs {
        let same_line = line
            .last()
            .map(|prev| (prev.y - run.y).abs() <= LINE_TOLERANCE)
            .unwrap_or(true);
        if !same_line {
            blocks.push(finish_line(std::mem::take(&mut line)));
        }
        line.push(run);
    }
    if !line.is_empty() {
        blocks.push(finish_line(line));
    }

    blocks
}

/// Merge the runs of one line into a text block with a bounding box
fn finish_line(mut runs: Vec<TextRun>) -> TextBlock {
    runs.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut text = String::new();
    let mut chars = Vec::new();
    let mut x0 = f64::MAX;
    let mut x1 = f64::MIN;
    let mut y0 = f64::MAX;
    let mut y1 = f64::MIN;
    let mut prev_end: Option<f64> = None;

    for run in &runs {
        let advance = run.text.chars().count() as f64 * run.size * GLYPH_ADVANCE_RATIO;
        // Insert a space across visible horizontal gaps between runs
        if let Some(end) = prev_end {
            if run.x - end > run.size * GLYPH_ADVANCE_RATIO && !text.is_empty() {
                text.push(' ');
                chars.push(CharRecord::new(' ', run.size));
            }
        }
        text.push_str(&run.text);
        for c in run.text.chars() {
            chars.push(CharRecord::new(c, run.size));
        }

        x0 = x0.min(run.x);
        x1 = x1.max(run.x + advance);
        y0 = y0.min(run.y);
        y1 = y1.max(run.y + run.size);
        prev_end = Some(run.x + advance);
    }

    TextBlock {
        text,
        bbox: BoundingBox::new(x0, y0, x1, y1),
        chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn text_obj(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec(), lopdf::StringFormat::Literal)
    }

    #[test]
    fn test_collect_runs_tracks_size_and_position() {
        let content = Content {
            operations: vec![
                op("BT", vec![]),
                op("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
                op("Td", vec![Object::Integer(100), Object::Integer(700)]),
                op("Tj", vec![text_obj("Title")]),
                op("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]),
                op("Td", vec![Object::Integer(0), Object::Integer(-50)]),
                op("Tj", vec![text_obj("body")]),
                op("ET", vec![]),
            ],
        };

        let runs = collect_runs(&content);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Title");
        assert_eq!(runs[0].size, 24.0);
        assert_eq!((runs[0].x, runs[0].y), (100.0, 700.0));
        assert_eq!(runs[1].text, "body");
        assert_eq!(runs[1].size, 10.0);
        assert_eq!(runs[1].y, 650.0);
    }

    #[test]
    fn test_tj_array_concatenates_on_one_line() {
        let content = Content {
            operations: vec![
                op("BT", vec![]),
                op("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                op(
                    "Tm",
                    vec![
                        Object::Integer(1),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(1),
                        Object::Integer(50),
                        Object::Integer(500),
                    ],
                ),
                op(
                    "TJ",
                    vec![Object::Array(vec![
                        text_obj("Hel"),
                        Object::Integer(-20),
                        text_obj("lo"),
                    ])],
                ),
            ],
        };

        let runs = collect_runs(&content);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].y, runs[1].y);

        let blocks = group_into_lines(runs);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Hello");
    }

    #[test]
    fn test_group_into_lines_orders_top_down() {
        let runs = vec![
            TextRun {
                x: 10.0,
                y: 100.0,
                size: 12.0,
                text: "lower".into(),
            },
            TextRun {
                x: 10.0,
                y: 500.0,
                size: 12.0,
                text: "upper".into(),
            },
        ];

        let blocks = group_into_lines(runs);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "upper");
        assert_eq!(blocks[1].text, "lower");
    }

    #[test]
    fn test_line_block_carries_char_sizes() {
        let runs = vec![TextRun {
            x: 10.0,
            y: 100.0,
            size: 18.0,
            text: "AB".into(),
        }];

        let blocks = group_into_lines(runs);
        assert_eq!(blocks[0].chars.len(), 2);
        assert_eq!(blocks[0].chars[0], CharRecord::new('A', 18.0));
        assert!(blocks[0].bbox.x0 < blocks[0].bbox.x1);
    }

    #[test]
    fn test_quote_operators_advance_line() {
        let content = Content {
            operations: vec![
                op("BT", vec![]),
                op("TL", vec![Object::Integer(14)]),
                op("Td", vec![Object::Integer(0), Object::Integer(700)]),
                op("'", vec![text_obj("first")]),
                op("'", vec![text_obj("second")]),
            ],
        };

        let runs = collect_runs(&content);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].y, 686.0);
        assert_eq!(runs[1].y, 672.0);
    }

    #[test]
    fn test_decode_text_strips_control_chars() {
        assert_eq!(decode_text(b"ab\x01c"), "abc");
        assert_eq!(decode_text(b""), "");
    }
}
