//! Observer notification for completed calculations.
//!
//! ```text
//! Calculator::calculate
//!        |
//!   ObserverRegistry::notify_all
//!        |
//!   +----+-------------+
//!   |                  |
//! LoggingObserver  AutoSaveObserver
//! ```
//!
//! Observers are invoked in registration order. Each call is isolated: an
//! error is logged with the observer's name and the next observer still runs.

mod handler;
mod observers;
mod registry;

pub use handler::CalculationObserver;
pub use observers::{AutoSaveObserver, LoggingObserver};
pub use registry::ObserverRegistry;
