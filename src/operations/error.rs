//! Error types for operation dispatch.

use thiserror::Error;

/// Domain-invalid arithmetic or an unknown operation name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer division by zero")]
    IntegerDivisionByZero,

    #[error("Modulus by zero")]
    ModulusByZero,

    #[error("Root degree cannot be zero")]
    ZeroRootDegree,

    #[error("Even root ({degree}) of negative number {base}")]
    EvenRootOfNegative { base: f64, degree: f64 },

    #[error("Percentage base cannot be zero")]
    ZeroPercentBase,

    #[error("{operation} is undefined for {value} (argument must be positive)")]
    LogDomain { operation: String, value: f64 },

    #[error("Operation '{operation}' requires two operands")]
    MissingOperand { operation: String },

    #[error("Unknown operation '{0}'")]
    Unknown(String),
}

pub type OperationResult<T> = Result<T, OperationError>;
