//! Observer trait for calculation events.

use crate::calculation::Calculation;

/// Receives every successful calculation.
///
/// Observers run after the record is in history. A failing observer is
/// logged and skipped; it never undoes or fails the calculation.
pub trait CalculationObserver: Send + Sync {
    /// Observer name for logging.
    fn name(&self) -> &str;

    /// Handle one calculation.
    fn notify(&self, calculation: &Calculation) -> anyhow::Result<()>;
}
