//! rune-bidi: visual reordering of bidirectional text runs.
//!
//! Upstream layout computes embedding levels and splits a line into runs;
//! [`Reorderer`] relinks those runs from logical into visual order in one
//! pass (UAX-9 rule L2). Run payloads are never touched, so reversing the
//! characters of odd-level runs stays with the caller.
//!
//! ```
//! use rune_bidi::{Line, reorder_line};
//!
//! let mut line = Line::new();
//! line.push(0, "abc ");
//! line.push(1, "אבג");
//! line.push(2, "12");
//! line.push(1, "דה");
//! let visual = reorder_line(line).unwrap().into_payloads();
//! assert_eq!(visual, vec!["abc ", "דה", "12", "אבג"]);
//! ```

pub mod bidi;
pub mod error;

pub use bidi::{
    BaseDirection, BidiRun, Line, Reorderer, Run, RunId, reorder_line, reorder_text, text_line,
    visual_order, visual_runs,
};
pub use error::{ReorderError, Result};
pub use rune_config::BidiConfig;
