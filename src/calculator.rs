//! Calculator - facade composing validation, dispatch, history,
//! notification and persistence.
//!
//! ## Architecture
//!
//! ```text
//! Calculator
//!   ├── InputValidator    - raw operand -> bounded f64
//!   ├── OperationRegistry - name -> pure function
//!   ├── History           - bounded log + undo/redo snapshots
//!   ├── ObserverRegistry  - logging, autosave journal, custom observers
//!   └── HistoryStore      - optional JSON persistence
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use reckon::{Calculator, Settings};
//!
//! let mut calc = Calculator::new(Arc::new(Settings::default()));
//! let record = calc.calculate("add", "2", 3).unwrap();
//! assert_eq!(record.result(), 5.0);
//! assert_eq!(calc.history().len(), 1);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::calculation::{Calculation, Operand};
use crate::config::Settings;
use crate::history::{History, StepOutcome};
use crate::observer::{AutoSaveObserver, CalculationObserver, LoggingObserver, ObserverRegistry};
use crate::operations::{OperationError, OperationRegistry};
use crate::storage::{
    HistoryStore, Journal, JsonHistoryStore, LoadReport, PersistenceError,
};
use crate::utils::round_to_precision;
use crate::validation::{DEFAULT_MAX_INPUT, InputValidator, ValidationError};

/// Errors surfaced to callers of the calculator.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type CalculatorResult<T> = Result<T, CalculatorError>;

/// Single entry point for calculations and history management.
pub struct Calculator {
    settings: Arc<Settings>,
    validator: InputValidator,
    operations: OperationRegistry,
    history: History,
    observers: ObserverRegistry,
    store: Option<Box<dyn HistoryStore>>,
}

impl Calculator {
    /// Create a bare calculator: no observers, no persistence.
    ///
    /// Settings that fail [`Settings::validate`] are not fatal here: an
    /// unusable `max_input_value` falls back to the default bound, and
    /// `precision` is capped when rounding.
    pub fn new(settings: Arc<Settings>) -> Self {
        let mut max_input = settings.max_input_value;
        if let Err(e) = settings.validate() {
            tracing::warn!("[calculator] {e}");
            if !max_input.is_finite() || max_input <= 0.0 {
                max_input = DEFAULT_MAX_INPUT;
            }
        }

        Self {
            validator: InputValidator::new(max_input),
            operations: OperationRegistry::new(),
            history: History::new(settings.max_history_size),
            observers: ObserverRegistry::new(),
            store: None,
            settings,
        }
    }

    /// Create a calculator wired from settings.
    ///
    /// Registers the logging observer and, with `auto_save`, the journal
    /// observer and the JSON history store. An existing history file is
    /// loaded; a missing one is not an error.
    pub fn open(settings: Arc<Settings>) -> Self {
        let mut calculator = Self::new(settings.clone())
            .with_store(Box::new(JsonHistoryStore::new(settings.history_path())));

        calculator.register_observer(Arc::new(LoggingObserver::new()));
        if settings.auto_save {
            calculator.register_observer(Arc::new(AutoSaveObserver::new(Journal::new(
                settings.journal_path(),
            ))));
        }

        match calculator.load_history(None) {
            Ok(report) => {
                crate::debug_event!("calculator", "restored", "{} records", report.loaded());
            }
            Err(CalculatorError::Persistence(PersistenceError::NotFound { .. })) => {}
            Err(e) => tracing::warn!("[calculator] could not restore history: {e}"),
        }

        calculator
    }

    /// Attach a persistence backend.
    pub fn with_store(mut self, store: Box<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Register an observer. Returns `false` if this instance is already registered.
    pub fn register_observer(&mut self, observer: Arc<dyn CalculationObserver>) -> bool {
        self.observers.register(observer)
    }

    /// Compute a binary operation (or a unary one with an ignored second operand).
    pub fn calculate(
        &mut self,
        operation: &str,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> CalculatorResult<Calculation> {
        self.calculate_operands(operation, a.into(), Some(b.into()))
    }

    /// Compute a unary operation such as `sin` or `abs`.
    pub fn calculate_unary(
        &mut self,
        operation: &str,
        a: impl Into<Operand>,
    ) -> CalculatorResult<Calculation> {
        self.calculate_operands(operation, a.into(), None)
    }

    /// Validate, compute, record, notify and persist.
    ///
    /// Validation and operation errors abort the calculation and leave the
    /// history untouched. Observer and persistence failures are logged only.
    pub fn calculate_operands(
        &mut self,
        operation: &str,
        a: Operand,
        b: Option<Operand>,
    ) -> CalculatorResult<Calculation> {
        let name = operation.trim().to_lowercase();

        let a = self.validator.validate(&a)?;
        let b = b.map(|raw| self.validator.validate(&raw)).transpose()?;

        let raw_result = self.operations.execute(&name, a, b)?;
        let result = round_to_precision(raw_result, self.settings.precision);

        // Missing second operand is recorded as 0.
        let calculation = Calculation::new(name, a, b.unwrap_or(0.0), result);

        self.history.push(calculation.clone());
        self.observers.notify_all(&calculation);
        self.persist();

        Ok(calculation)
    }

    /// Read-only view of the history, oldest first.
    pub fn history(&self) -> &[Calculation] {
        self.history.list()
    }

    pub fn history_state(&self) -> &History {
        &self.history
    }

    pub fn undo(&mut self) -> StepOutcome {
        let outcome = self.history.undo();
        if outcome.changed() {
            self.persist();
        }
        outcome
    }

    pub fn redo(&mut self) -> StepOutcome {
        let outcome = self.history.redo();
        if outcome.changed() {
            self.persist();
        }
        outcome
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// Save the history to `path`, or to the attached store when `None`.
    pub fn save_history(&self, path: Option<&Path>) -> CalculatorResult<PathBuf> {
        let records = self.history.list();
        match (path, &self.store) {
            (Some(path), _) => {
                JsonHistoryStore::new(path).store(records)?;
                Ok(path.to_path_buf())
            }
            (None, Some(store)) => {
                store.store(records)?;
                Ok(store.path().to_path_buf())
            }
            (None, None) => {
                let store = JsonHistoryStore::new(self.settings.history_path());
                store.store(records)?;
                Ok(store.path().to_path_buf())
            }
        }
    }

    /// Replace the history with the records stored at `path` (or the
    /// attached store). Malformed records are skipped.
    pub fn load_history(&mut self, path: Option<&Path>) -> CalculatorResult<LoadReport> {
        let report = match (path, &self.store) {
            (Some(path), _) => JsonHistoryStore::new(path).load()?,
            (None, Some(store)) => store.load()?,
            (None, None) => JsonHistoryStore::new(self.settings.history_path()).load()?,
        };

        self.history.replace(report.records.iter().cloned());
        if report.skipped > 0 {
            tracing::warn!(
                "[calculator] loaded {} records, skipped {} malformed",
                report.loaded(),
                report.skipped
            );
        }
        Ok(report)
    }

    /// Best-effort save through the attached store when auto-save is on.
    fn persist(&self) {
        if !self.settings.auto_save {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.store(self.history.list()) {
                tracing::error!("[calculator] autosave failed: {e}");
            }
        }
    }

    pub fn operations(&self) -> &OperationRegistry {
        &self.operations
    }

    pub fn operations_mut(&mut self) -> &mut OperationRegistry {
        &mut self.operations
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_deref().map(|s| s.path())
    }
}
