//! Calculator library with validated operations, a bounded undoable
//! history, observer notification and JSON persistence.
//!
//! The [`Calculator`] facade is the usual entry point:
//!
//! ```
//! use std::sync::Arc;
//! use reckon::{Calculator, Settings};
//!
//! let mut calc = Calculator::new(Arc::new(Settings::default()));
//! calc.calculate("multiply", 6, 7).unwrap();
//! calc.undo();
//! assert!(calc.history().is_empty());
//! ```

pub mod calculation;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod history;
pub mod logging;
pub mod observer;
pub mod operations;
pub mod storage;
pub mod utils;
pub mod validation;

pub use calculation::{Calculation, Operand};
pub use calculator::{Calculator, CalculatorError, CalculatorResult};
pub use config::{ConfigError, LoggingConfig, Settings};
pub use history::{History, StepOutcome};
pub use observer::{AutoSaveObserver, CalculationObserver, LoggingObserver, ObserverRegistry};
pub use operations::{Arity, Operation, OperationError, OperationRegistry};
pub use storage::{HistoryStore, Journal, JsonHistoryStore, LoadReport, PersistenceError};
pub use validation::{InputValidator, ValidationError};
