//! Stack of visually merged run spans used by the L2 sweep.

use crate::bidi::run::{Line, RunId};
use crate::error::{ReorderError, Result};

/// A span of runs already in correct relative visual order.
///
/// Following `next` links from `left` reaches `right`; the successor of
/// `right` is meaningless until the range is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub level: u8,
    pub left: RunId,
    pub right: RunId,
}

impl Range {
    pub fn single(run: RunId, level: u8) -> Self {
        Self {
            level,
            left: run,
            right: run,
        }
    }
}

/// LIFO of ranges. The `previous` range of an entry is the one directly
/// beneath it; levels strictly increase towards the top.
#[derive(Debug, Default)]
pub struct RangeStack {
    ranges: Vec<Range>,
    pushes: usize,
    merges: usize,
}

impl RangeStack {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut ranges = Vec::new();
        ranges.try_reserve(capacity)?;
        Ok(Self {
            ranges,
            pushes: 0,
            merges: 0,
        })
    }

    pub fn top(&self) -> Option<&Range> {
        self.ranges.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Range> {
        self.ranges.last_mut()
    }

    /// The range beneath the top.
    pub fn previous(&self) -> Option<&Range> {
        self.ranges.len().checked_sub(2).map(|i| &self.ranges[i])
    }

    pub fn depth(&self) -> usize {
        self.ranges.len()
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Push a fresh single-run range. Growth failure is reported rather than
    /// aborting the process.
    pub fn push(&mut self, range: Range) -> Result<()> {
        if self.ranges.len() == self.ranges.capacity() {
            self.ranges.try_reserve(1)?;
        }
        self.ranges.push(range);
        self.pushes += 1;
        Ok(())
    }

    /// Merge the top range into the one beneath it and return the survivor.
    ///
    /// An odd `previous` level places the previous span to the right of the
    /// top span, an even one to the left. `run` and `level` describe the run
    /// being placed and only feed the error.
    pub fn merge_top<T>(&mut self, line: &mut Line<T>, run: RunId, level: u8) -> Result<Range> {
        let Some(range) = self.ranges.pop() else {
            return Err(broken(run, level));
        };
        let Some(previous) = self.ranges.last_mut() else {
            return Err(broken(run, level));
        };
        if previous.level >= range.level {
            return Err(broken(run, level));
        }

        let (left, right) = if previous.level % 2 == 1 {
            (range, *previous)
        } else {
            (*previous, range)
        };
        line.set_next(left.right, Some(right.left));

        previous.left = left.left;
        previous.right = right.right;
        self.merges += 1;
        Ok(*previous)
    }
}

fn broken(run: RunId, level: u8) -> ReorderError {
    tracing::warn!(%run, level, "bidi range stack invariant violated");
    ReorderError::BrokenStack { run, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(levels: &[u8]) -> Line<usize> {
        Line::from_levels(levels)
    }

    #[test]
    fn even_previous_goes_left() {
        let mut line = line_of(&[0, 1]);
        let mut stack = RangeStack::with_capacity(2).unwrap();
        stack.push(Range::single(RunId(0), 0)).unwrap();
        stack.push(Range::single(RunId(1), 1)).unwrap();

        let merged = stack.merge_top(&mut line, RunId(1), 1).unwrap();
        assert_eq!(merged.left, RunId(0));
        assert_eq!(merged.right, RunId(1));
        assert_eq!(merged.level, 0);
        assert_eq!(stack.depth(), 1);
        assert_eq!(line.get(RunId(0)).unwrap().next(), Some(RunId(1)));
    }

    #[test]
    fn odd_previous_goes_right() {
        let mut line = line_of(&[1, 2]);
        let mut stack = RangeStack::with_capacity(0).unwrap();
        stack.push(Range::single(RunId(0), 1)).unwrap();
        stack.push(Range::single(RunId(1), 2)).unwrap();

        let merged = stack.merge_top(&mut line, RunId(1), 2).unwrap();
        assert_eq!(merged.left, RunId(1));
        assert_eq!(merged.right, RunId(0));
        assert_eq!(line.get(RunId(1)).unwrap().next(), Some(RunId(0)));
        assert_eq!(stack.merges(), 1);
        assert_eq!(stack.pushes(), 2);
    }

    #[test]
    fn merge_without_previous_is_an_error() {
        let mut line = line_of(&[3]);
        let mut stack = RangeStack::with_capacity(1).unwrap();
        stack.push(Range::single(RunId(0), 3)).unwrap();
        assert_eq!(
            stack.merge_top(&mut line, RunId(0), 3),
            Err(ReorderError::BrokenStack {
                run: RunId(0),
                level: 3
            })
        );
    }

    #[test]
    fn merge_rejects_non_increasing_levels() {
        let mut line = line_of(&[2, 2]);
        let mut stack = RangeStack::with_capacity(2).unwrap();
        stack.push(Range::single(RunId(0), 2)).unwrap();
        stack.push(Range::single(RunId(1), 2)).unwrap();
        assert!(matches!(
            stack.merge_top(&mut line, RunId(1), 2),
            Err(ReorderError::BrokenStack { .. })
        ));
    }
}
