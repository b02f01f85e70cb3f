use core::ops::Range;

use unicode_bidi::{BidiInfo, Level, LTR_LEVEL, RTL_LEVEL};

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(LTR_LEVEL),
            BaseDirection::Rtl => Some(RTL_LEVEL),
        }
    }
}

/// Compute embedding levels for each byte in the text.
///
/// The result is parallel to `text.as_bytes()`: multi-byte characters
/// will have the same level repeated for each byte.
pub fn levels_per_byte(text: &str, base_dir: BaseDirection) -> Vec<u8> {
    let info = BidiInfo::new(text, base_dir.to_level());
    info.levels.iter().map(Level::number).collect()
}

/// Split a level array into maximal runs of equal level, in logical order.
pub fn level_runs(levels: &[u8]) -> Vec<(Range<usize>, u8)> {
    let mut runs = Vec::new();
    let Some(&first) = levels.first() else {
        return runs;
    };
    let mut start = 0;
    let mut run_level = first;
    for (i, &level) in levels.iter().enumerate().skip(1) {
        if level != run_level {
            runs.push((start..i, run_level));
            start = i;
            run_level = level;
        }
    }
    runs.push((start..levels.len(), run_level));
    runs
}
