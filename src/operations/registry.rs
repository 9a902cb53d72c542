//! Name-to-function operation registry.

use std::collections::BTreeMap;

use super::builtin;
use super::error::{OperationError, OperationResult};

/// Signature shared by every operation. Unary operations ignore `b`.
pub type OperationFn = fn(f64, f64) -> OperationResult<f64>;

/// Number of operands an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

/// A named pure function with its arity.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    name: &'static str,
    arity: Arity,
    description: &'static str,
    apply: OperationFn,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        arity: Arity,
        description: &'static str,
        apply: OperationFn,
    ) -> Self {
        Self {
            name,
            arity,
            description,
            apply,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Apply the operation. A missing `b` is an error for binary operations.
    pub fn apply(&self, a: f64, b: Option<f64>) -> OperationResult<f64> {
        match (self.arity, b) {
            (Arity::Binary, None) => Err(OperationError::MissingOperand {
                operation: self.name.to_string(),
            }),
            (Arity::Binary, Some(b)) => (self.apply)(a, b),
            (Arity::Unary, _) => (self.apply)(a, 0.0),
        }
    }
}

/// Registry of operations keyed by lower-case name.
///
/// Lookup is exact; callers normalize case before dispatch.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, Operation>,
}

impl OperationRegistry {
    /// Create a registry holding the built-in operations.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for op in builtin::all() {
            registry.register(op);
        }
        registry
    }

    /// Create a registry with no operations.
    pub fn empty() -> Self {
        Self {
            operations: BTreeMap::new(),
        }
    }

    /// Add an operation, replacing any existing one with the same name.
    pub fn register(&mut self, operation: Operation) -> Option<Operation> {
        self.operations.insert(operation.name, operation)
    }

    pub fn get(&self, name: &str) -> OperationResult<&Operation> {
        self.operations
            .get(name)
            .ok_or_else(|| OperationError::Unknown(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Look up `name` and apply it to the operands.
    pub fn execute(&self, name: &str, a: f64, b: Option<f64>) -> OperationResult<f64> {
        self.get(name)?.apply(a, b)
    }

    /// Operation names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
