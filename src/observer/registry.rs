//! Ordered set of observers with per-observer fault isolation.

use std::sync::Arc;

use super::handler::CalculationObserver;
use crate::calculation::Calculation;

#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn CalculationObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. Returns `false` if this exact instance is already
    /// registered.
    pub fn register(&mut self, observer: Arc<dyn CalculationObserver>) -> bool {
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            crate::debug_event!("observers", "duplicate", "{}", observer.name());
            return false;
        }
        crate::debug_event!("observers", "registered", "{}", observer.name());
        self.observers.push(observer);
        true
    }

    /// Notify every observer in registration order.
    ///
    /// Returns the number of observers that failed.
    pub fn notify_all(&self, calculation: &Calculation) -> usize {
        let mut failures = 0;
        for observer in &self.observers {
            if let Err(e) = observer.notify(calculation) {
                tracing::error!("[{}] observer failed: {e:#}", observer.name());
                failures += 1;
            }
        }
        failures
    }

    pub fn names(&self) -> Vec<&str> {
        self.observers.iter().map(|o| o.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.names())
            .finish()
    }
}
