//! Checkpoints of the history sequence used by undo/redo.

use crate::calculation::Calculation;

/// An independent copy of the history sequence at one point in time.
///
/// Snapshots own their records, so later changes to the live sequence never
/// reach a stored snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: Vec<Calculation>,
}

impl Snapshot {
    pub fn capture(entries: &[Calculation]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Copy of the captured records, for restoring the live sequence.
    pub fn restore(&self) -> Vec<Calculation> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut live = vec![Calculation::new("add", 1.0, 1.0, 2.0)];
        let snapshot = Snapshot::capture(&live);

        live.push(Calculation::new("add", 2.0, 2.0, 4.0));
        live[0] = Calculation::new("abs", -3.0, 0.0, 3.0);

        let restored = snapshot.restore();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].operation(), "add");
        assert_eq!(snapshot, Snapshot::capture(&restored));
    }
}
