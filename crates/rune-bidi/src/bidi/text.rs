//! Adapter from text to reorderable lines, using `unicode-bidi` for levels.

use core::ops::Range;

use unicode_bidi::{BidiInfo, Level, ParagraphInfo};

use crate::bidi::levels::{BaseDirection, level_runs};
use crate::bidi::reorder::reorder_line;
use crate::bidi::run::Line;
use crate::error::{ReorderError, Result};

/// A run of text with a single BiDi embedding level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// Byte range in the original text.
    pub range: Range<usize>,
    /// Embedding level for this run.
    pub level: u8,
}

impl BidiRun {
    pub fn is_rtl(&self) -> bool {
        self.level % 2 == 1
    }
}

/// Split one line of `text` into level runs in logical order.
///
/// Levels come from the full UAX-9 paragraph analysis, with the line-level
/// adjustments of rule L1 applied. `line` is a byte range that must lie
/// within a single paragraph.
pub fn text_line(text: &str, base_dir: BaseDirection, line: Range<usize>) -> Result<Line<BidiRun>> {
    if line.is_empty() {
        return Ok(Line::new());
    }
    if line.end > text.len() || !text.is_char_boundary(line.start) || !text.is_char_boundary(line.end) {
        return Err(invalid_line(&line));
    }

    let info = BidiInfo::new(text, base_dir.to_level());
    let para = find_paragraph(&info, &line).ok_or_else(|| invalid_line(&line))?;
    let levels: Vec<u8> = info.reordered_levels(para, line.clone())[line.clone()]
        .iter()
        .map(Level::number)
        .collect();

    Ok(level_runs(&levels)
        .into_iter()
        .map(|(range, level)| {
            let range = range.start + line.start..range.end + line.start;
            (level, BidiRun { range, level })
        })
        .collect())
}

/// Compute BiDi level runs for a line in visual order.
///
/// The returned runs are ranges in the original text and appear in
/// the order they should be rendered visually. Runs with an odd level
/// must still have their characters reversed when drawn.
pub fn visual_runs(text: &str, base_dir: BaseDirection, line: Range<usize>) -> Result<Vec<BidiRun>> {
    let logical = text_line(text, base_dir, line)?;
    Ok(reorder_line(logical)?.into_payloads())
}

/// Render one line in visual order, reversing the characters of RTL runs.
pub fn reorder_text(text: &str, base_dir: BaseDirection, line: Range<usize>) -> Result<String> {
    let mut out = String::with_capacity(line.len());
    for run in visual_runs(text, base_dir, line)? {
        let slice = &text[run.range.clone()];
        if run.is_rtl() {
            out.extend(slice.chars().rev());
        } else {
            out.push_str(slice);
        }
    }
    Ok(out)
}

fn find_paragraph<'text>(info: &'text BidiInfo<'text>, line: &Range<usize>) -> Option<&'text ParagraphInfo> {
    info.paragraphs
        .iter()
        .find(|p| line.start >= p.range.start && line.end <= p.range.end)
}

fn invalid_line(line: &Range<usize>) -> ReorderError {
    ReorderError::InvalidLine {
        start: line.start,
        end: line.end,
    }
}
