use core::fmt;

use crate::error::{ReorderError, Result};

/// Index of a run inside its [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub usize);

impl RunId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One maximal span of text at a single embedding level.
///
/// The payload is carried through reordering untouched; only the successor
/// link changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<T> {
    /// Embedding level (even = LTR, odd = RTL).
    pub level: u8,
    /// Caller data (text range, glyphs, ...).
    pub payload: T,
    pub(crate) next: Option<RunId>,
}

impl<T> Run<T> {
    pub fn new(level: u8, payload: T) -> Self {
        Self {
            level,
            payload,
            next: None,
        }
    }

    /// Set the successor link, for callers assembling a chain by hand.
    pub fn with_next(mut self, next: Option<RunId>) -> Self {
        self.next = next;
        self
    }

    pub fn next(&self) -> Option<RunId> {
        self.next
    }

    /// Whether the run is right-to-left. After reordering, the caller must
    /// reverse the contents of every such run.
    pub fn is_rtl(&self) -> bool {
        self.level % 2 == 1
    }
}

/// A line of runs stored in an arena and linked through [`Run::next`].
///
/// Before reordering the chain from `head` is the logical order; after it,
/// the visual order. Arena positions never move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<T> {
    runs: Vec<Run<T>>,
    head: Option<RunId>,
    tail: Option<RunId>,
}

impl<T> Default for Line<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Line<T> {
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Adopt runs whose successor links were set by the caller.
    ///
    /// The chain is not checked here; [`Line::check_chain`] (run by the
    /// reorderer) rejects chains that skip or revisit runs.
    pub fn from_parts(runs: Vec<Run<T>>, head: Option<RunId>) -> Self {
        Self {
            runs,
            head,
            tail: None,
        }
    }

    /// Append a run to the end of the chain.
    pub fn push(&mut self, level: u8, payload: T) -> RunId {
        let id = RunId(self.runs.len());
        self.runs.push(Run::new(level, payload));
        match self.tail.or_else(|| self.last_in_chain()) {
            Some(tail) => self.runs[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    fn last_in_chain(&self) -> Option<RunId> {
        let mut cursor = self.head?;
        let mut steps = 0;
        while let Some(next) = self.runs.get(cursor.0).and_then(|run| run.next) {
            steps += 1;
            if steps > self.runs.len() {
                return None;
            }
            cursor = next;
        }
        Some(cursor)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn head(&self) -> Option<RunId> {
        self.head
    }

    pub fn get(&self, id: RunId) -> Option<&Run<T>> {
        self.runs.get(id.0)
    }

    /// Runs in chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            runs: &self.runs,
            cursor: self.head,
            remaining: self.runs.len(),
        }
    }

    /// Run ids in chain order.
    pub fn ids(&self) -> Vec<RunId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Levels in chain order.
    pub fn levels(&self) -> Vec<u8> {
        self.iter().map(|(_, run)| run.level).collect()
    }

    pub fn payloads(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, run)| &run.payload)
    }

    /// Consume the line, yielding payloads in chain order.
    pub fn into_payloads(self) -> Vec<T> {
        let order = self.ids();
        let mut slots: Vec<Option<T>> = self
            .runs
            .into_iter()
            .map(|run| Some(run.payload))
            .collect();
        order
            .into_iter()
            .filter_map(|id| slots[id.0].take())
            .collect()
    }

    /// Verify that the chain from `head` visits every run exactly once.
    pub fn check_chain(&self) -> Result<()> {
        let len = self.runs.len();
        let mut visited = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(run) = self.runs.get(id.0) else {
                break;
            };
            visited += 1;
            if visited > len {
                break;
            }
            cursor = run.next;
        }
        if visited == len && cursor.is_none() {
            Ok(())
        } else {
            Err(ReorderError::MalformedChain { visited, len })
        }
    }

    pub(crate) fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    pub(crate) fn set_next(&mut self, id: RunId, next: Option<RunId>) {
        self.runs[id.0].next = next;
    }

    pub(crate) fn relink(&mut self, head: Option<RunId>, tail: Option<RunId>) {
        self.head = head;
        self.tail = tail;
    }
}

impl Line<usize> {
    /// Build a line whose payloads are the logical positions of `levels`.
    pub fn from_levels(levels: &[u8]) -> Self {
        levels.iter().copied().zip(0..).collect()
    }
}

impl<T> FromIterator<(u8, T)> for Line<T> {
    fn from_iter<I: IntoIterator<Item = (u8, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut line = Line::with_capacity(iter.size_hint().0);
        for (level, payload) in iter {
            line.push(level, payload);
        }
        line
    }
}

/// Iterator over a [`Line`] in chain order.
pub struct Iter<'a, T> {
    runs: &'a [Run<T>],
    cursor: Option<RunId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (RunId, &'a Run<T>);

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` bounds the walk on cyclic hand-built chains.
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        let run = self.runs.get(id.0)?;
        self.remaining -= 1;
        self.cursor = run.next;
        Some((id, run))
    }
}
