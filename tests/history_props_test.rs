//! Property tests for the history invariants.

use proptest::prelude::*;
use reckon::{Calculation, History, StepOutcome};

fn record(i: usize) -> Calculation {
    Calculation::new("add", i as f64, 0.0, i as f64)
}

fn results(history: &History) -> Vec<f64> {
    history.iter().map(Calculation::result).collect()
}

proptest! {
    #[test]
    fn length_never_exceeds_bound(max in 1usize..20, pushes in 0usize..60) {
        let mut history = History::new(max);
        for i in 0..pushes {
            history.push(record(i));
            prop_assert!(history.len() <= max);
        }
        prop_assert_eq!(history.len(), pushes.min(max));
        // The newest records are the ones kept
        if pushes > 0 {
            prop_assert_eq!(history.last().map(Calculation::result), Some((pushes - 1) as f64));
        }
    }

    #[test]
    fn undo_then_redo_restores_state(max in 1usize..10, pushes in 1usize..30, steps in 1usize..10) {
        let mut history = History::new(max);
        for i in 0..pushes {
            history.push(record(i));
        }
        let before = results(&history);

        let mut undone = 0;
        for _ in 0..steps {
            if history.undo().changed() {
                undone += 1;
            }
        }
        prop_assert_eq!(undone, steps.min(pushes));

        for _ in 0..undone {
            prop_assert_ne!(history.redo(), StepOutcome::Nothing);
        }
        prop_assert_eq!(results(&history), before);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn push_after_undo_clears_redo(pushes in 1usize..20, steps in 1usize..20) {
        let mut history = History::new(100);
        for i in 0..pushes {
            history.push(record(i));
        }
        for _ in 0..steps {
            history.undo();
        }
        history.push(record(999));
        prop_assert!(!history.can_redo());
        prop_assert_eq!(history.redo(), StepOutcome::Nothing);
        prop_assert_eq!(history.last().map(Calculation::result), Some(999.0));
    }
}
