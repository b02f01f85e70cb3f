use rune_config::BidiConfig;

use crate::bidi::range::{Range, RangeStack};
use crate::bidi::run::{Line, RunId};
use crate::error::{ReorderError, Result};

/// Reorders lines of runs from logical to visual order (UAX-9 rule L2).
///
/// The sweep visits runs once in logical order and keeps a stack of ranges
/// that are already in visual order. When a run arrives, every range above
/// it that is enclosed by a lower range is flattened into that range; the
/// run is then attached to the top range or starts a new one.
#[derive(Debug, Clone, Default)]
pub struct Reorderer {
    config: BidiConfig,
}

impl Reorderer {
    pub fn new(config: BidiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BidiConfig {
        &self.config
    }

    /// Relink `line` into visual order and hand it back.
    ///
    /// On error the line is dropped; no partially reordered line escapes.
    /// The caller is responsible for reversing the contents of runs with an
    /// odd level.
    pub fn reorder<T>(&self, mut line: Line<T>) -> Result<Line<T>> {
        line.check_chain()?;
        if self.config.validate_levels {
            self.validate(&line)?;
        }
        let Some(first) = line.head() else {
            return Ok(line);
        };

        let mut stack = RangeStack::with_capacity(self.config.stack_capacity)?;
        let mut cursor = Some(first);
        while let Some(run) = cursor {
            let (level, next_run) = {
                let r = &line.runs()[run.index()];
                (r.level, r.next)
            };
            self.place(&mut stack, &mut line, run, level)?;
            cursor = next_run;
        }

        let closing = stack.top().map(|top| top.left).unwrap_or(first);
        while stack.depth() > 1 {
            stack.merge_top(&mut line, closing, 0)?;
        }
        let Some(&Range { left, right, .. }) = stack.top() else {
            return Err(ReorderError::BrokenStack {
                run: first,
                level: 0,
            });
        };
        line.set_next(right, None);
        line.relink(Some(left), Some(right));

        tracing::trace!(
            runs = line.len(),
            pushes = stack.pushes(),
            merges = stack.merges(),
            "reordered bidi line"
        );
        Ok(line)
    }

    fn place<T>(&self, stack: &mut RangeStack, line: &mut Line<T>, run: RunId, level: u8) -> Result<()> {
        // Flatten ranges enclosed between the previous lower range and this run.
        loop {
            let (Some(top), Some(previous)) = (
                stack.top().map(|r| r.level),
                stack.previous().map(|r| r.level),
            ) else {
                break;
            };
            if top > level && previous >= level {
                stack.merge_top(line, run, level)?;
            } else {
                break;
            }
        }

        if !stack.top().is_some_and(|top| top.level >= level) {
            return stack.push(Range::single(run, level));
        }
        if let Some(top) = stack.top_mut() {
            if level % 2 == 1 {
                line.set_next(run, Some(top.left));
                top.left = run;
            } else {
                line.set_next(top.right, Some(run));
                top.right = run;
            }
            top.level = level;
        }
        Ok(())
    }

    fn validate<T>(&self, line: &Line<T>) -> Result<()> {
        let max = self.config.max_level;
        for (run, r) in line.iter() {
            if r.level > max {
                tracing::debug!(%run, level = r.level, max, "rejecting bidi line");
                return Err(ReorderError::InvalidLevel {
                    run,
                    level: r.level,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Reorder `line` with the default configuration.
pub fn reorder_line<T>(line: Line<T>) -> Result<Line<T>> {
    Reorderer::default().reorder(line)
}

/// Logical indices of `levels` in visual order, so that
/// `map[visual] == logical`.
pub fn visual_order(levels: &[u8]) -> Result<Vec<usize>> {
    Ok(reorder_line(Line::from_levels(levels))?.into_payloads())
}
