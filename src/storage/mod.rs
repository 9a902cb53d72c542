//! Persistence for calculation history.
//!
//! - [`JsonHistoryStore`]: the current history as one JSON array, rewritten
//!   atomically on save.
//! - [`Journal`]: append-only JSON Lines log written by the autosave observer.

pub mod error;
pub mod journal;
pub mod persistence;

pub use error::{PersistenceError, PersistenceResult};
pub use journal::Journal;
pub use persistence::{HistoryStore, JsonHistoryStore, LoadReport, parse_records};
