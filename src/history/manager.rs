//! Bounded calculation history with snapshot-based undo/redo.

use super::snapshot::Snapshot;
use crate::calculation::Calculation;

/// Default number of records kept in the live sequence.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The relevant stack was empty; nothing changed.
    Nothing,
    /// The last undo snapshot was consumed and the sequence is now empty.
    Emptied,
    /// The sequence was restored from a snapshot.
    Restored,
}

impl StepOutcome {
    /// Whether any state changed.
    pub fn changed(self) -> bool {
        !matches!(self, StepOutcome::Nothing)
    }
}

/// Ordered log of calculations.
///
/// Every push stores a snapshot of the resulting sequence on the undo
/// stack. Undo moves the top snapshot to the redo stack and restores the one
/// beneath it; redo moves it back. Snapshot storage grows quadratically with
/// the number of pushes since the last clear, and the undo stack itself is
/// not bounded.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Calculation>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_size: usize,
}

impl History {
    /// Create an empty history. `max_size` is clamped to at least 1.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Append a record, evicting the oldest entries past the bound.
    pub fn push(&mut self, calculation: Calculation) {
        self.entries.push(calculation);
        if self.entries.len() > self.max_size {
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(..excess);
        }
        self.undo_stack.push(Snapshot::capture(&self.entries));
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> StepOutcome {
        let Some(current) = self.undo_stack.pop() else {
            return StepOutcome::Nothing;
        };
        self.redo_stack.push(current);

        match self.undo_stack.last() {
            Some(previous) => {
                self.entries = previous.restore();
                StepOutcome::Restored
            }
            None => {
                self.entries.clear();
                StepOutcome::Emptied
            }
        }
    }

    pub fn redo(&mut self) -> StepOutcome {
        let Some(next) = self.redo_stack.pop() else {
            return StepOutcome::Nothing;
        };
        self.entries = next.restore();
        self.undo_stack.push(next);
        StepOutcome::Restored
    }

    /// Drop all records and both stacks.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Replace the whole history with `records`, oldest first.
    ///
    /// Each record is pushed in turn, so the loaded state can be stepped
    /// back with undo like any other session.
    pub fn replace<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Calculation>,
    {
        self.clear();
        for record in records {
            self.push(record);
        }
    }

    /// Read-only view of the live sequence, oldest first.
    pub fn list(&self) -> &[Calculation] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Calculation> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Calculation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Calculation;
    type IntoIter = std::slice::Iter<'a, Calculation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
