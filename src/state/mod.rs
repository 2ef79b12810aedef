//! State management modules for the list engine.
//!
//! This module contains state-only logic (no host or data concerns):
//! - Window state (materialized rows, index bounds, last scroll offset)
//! - Selection state (single selected row)

mod window;
mod selection;

pub use window::{WindowState, MaterializedRow, RowFlags, Highlight};
pub use selection::SelectionState;
