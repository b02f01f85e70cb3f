//! Bidirectional (BiDi) run reordering.
//!
//! - Linear-time, stack-based UAX-9 rule L2 over linked runs
//! - Text adapter computing levels and runs with `unicode-bidi`

pub mod levels;
pub mod range;
pub mod reorder;
pub mod run;
pub mod text;

pub use levels::{BaseDirection, level_runs, levels_per_byte};
pub use reorder::{Reorderer, reorder_line, visual_order};
pub use run::{Iter, Line, Run, RunId};
pub use text::{BidiRun, reorder_text, text_line, visual_runs};
