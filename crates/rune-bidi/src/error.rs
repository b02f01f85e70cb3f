//! Error types for bidi reordering.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::bidi::RunId;

/// Result type for reordering operations.
pub type Result<T> = std::result::Result<T, ReorderError>;

/// Errors that can occur while reordering a line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// A run carries a level no bidi level assignment can produce.
    #[error("run {run} has embedding level {level}, above the maximum of {max}")]
    InvalidLevel { run: RunId, level: u8, max: u8 },

    /// The successor links do not form a single chain over every run.
    #[error("run chain visits {visited} runs but the line holds {len}")]
    MalformedChain { visited: usize, len: usize },

    /// A merge found no lower-level range beneath the top of the stack.
    #[error("range stack broken while placing run {run} at level {level}")]
    BrokenStack { run: RunId, level: u8 },

    /// The range stack could not grow.
    #[error("range stack allocation failed: {0}")]
    Exhausted(#[from] TryReserveError),

    /// The requested line is not a char-aligned range inside one paragraph.
    #[error("line {start}..{end} is not a char-aligned range within a single paragraph")]
    InvalidLine { start: usize, end: usize },
}
