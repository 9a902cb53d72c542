//! Operation dispatch.
//!
//! Operations are plain functions registered by name in an
//! [`OperationRegistry`]. Each one validates its own domain (zero divisors,
//! even roots of negatives, logarithms of non-positive numbers) and reports
//! violations as [`OperationError`].
//!
//! ```
//! use reckon::operations::OperationRegistry;
//!
//! let registry = OperationRegistry::new();
//! assert_eq!(registry.execute("power", 2.0, Some(3.0)).unwrap(), 8.0);
//! assert!(registry.execute("divide", 1.0, Some(0.0)).is_err());
//! ```

mod builtin;
mod error;
mod registry;

pub use error::{OperationError, OperationResult};
pub use registry::{Arity, Operation, OperationFn, OperationRegistry};
