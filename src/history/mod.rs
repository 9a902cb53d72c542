//! Calculation history.
//!
//! [`History`] keeps an ordered, bounded sequence of
//! [`Calculation`](crate::Calculation) records together with two stacks of
//! [`Snapshot`]s for undo and redo.
//!
//! # State transitions
//!
//! ```text
//! push(r)  entries += r; evict oldest past max; undo += snapshot; redo = []
//! undo()   undo -> redo; entries = top(undo) or [] when undo is now empty
//! redo()   redo -> undo; entries = moved snapshot
//! clear()  entries = undo = redo = []
//! ```
//!
//! None of these fail. Empty stacks are reported as
//! [`StepOutcome::Nothing`].

mod manager;
mod snapshot;

pub use manager::{DEFAULT_MAX_HISTORY, History, StepOutcome};
pub use snapshot::Snapshot;
