//! Built-in observers.

use anyhow::Context;

use super::handler::CalculationObserver;
use crate::calculation::Calculation;
use crate::storage::Journal;

/// Writes one `info` log line per calculation.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl CalculationObserver for LoggingObserver {
    fn name(&self) -> &str {
        "logging"
    }

    fn notify(&self, calculation: &Calculation) -> anyhow::Result<()> {
        crate::log_event!(
            "calc",
            calculation.operation(),
            "{} {} = {}",
            calculation.a(),
            calculation.b(),
            calculation.result()
        );
        Ok(())
    }
}

/// Appends every calculation to the journal file.
#[derive(Debug, Clone)]
pub struct AutoSaveObserver {
    journal: Journal,
}

impl AutoSaveObserver {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}

impl CalculationObserver for AutoSaveObserver {
    fn name(&self) -> &str {
        "autosave"
    }

    fn notify(&self, calculation: &Calculation) -> anyhow::Result<()> {
        self.journal
            .append(calculation)
            .with_context(|| format!("autosave to {} failed", self.journal.path().display()))
    }
}
