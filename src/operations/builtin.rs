//! Built-in arithmetic, trigonometric and logarithmic operations.
//!
//! Every function takes both operands so they share one signature; unary
//! operations ignore `b`.

use super::error::{OperationError, OperationResult};
use super::registry::{Arity, Operation};

pub(super) fn all() -> Vec<Operation> {
    vec![
        Operation::new("add", Arity::Binary, "a + b", add),
        Operation::new("subtract", Arity::Binary, "a - b", subtract),
        Operation::new("multiply", Arity::Binary, "a * b", multiply),
        Operation::new("divide", Arity::Binary, "a / b", divide),
        Operation::new("power", Arity::Binary, "a raised to b", power),
        Operation::new("root", Arity::Binary, "b-th root of a", root),
        Operation::new("modulus", Arity::Binary, "a mod b (sign of b)", modulus),
        Operation::new("int_divide", Arity::Binary, "floor(a / b)", int_divide),
        Operation::new("percent", Arity::Binary, "a as a percentage of b", percent),
        Operation::new("abs_diff", Arity::Binary, "|a - b|", abs_diff),
        Operation::new("sin", Arity::Unary, "sine of a (degrees)", sin),
        Operation::new("cos", Arity::Unary, "cosine of a (degrees)", cos),
        Operation::new("tan", Arity::Unary, "tangent of a (degrees)", tan),
        Operation::new("log", Arity::Unary, "base-10 logarithm of a", log10),
        Operation::new("ln", Arity::Unary, "natural logarithm of a", ln),
        Operation::new("exp", Arity::Unary, "e raised to a", exp),
        Operation::new("abs", Arity::Unary, "absolute value of a", abs),
    ]
}

fn add(a: f64, b: f64) -> OperationResult<f64> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> OperationResult<f64> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> OperationResult<f64> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> OperationResult<f64> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> OperationResult<f64> {
    Ok(a.powf(b))
}

fn root(a: f64, b: f64) -> OperationResult<f64> {
    if b == 0.0 {
        return Err(OperationError::ZeroRootDegree);
    }
    if a < 0.0 {
        // Parity is decided on the truncated degree.
        if b.trunc() % 2.0 == 0.0 {
            return Err(OperationError::EvenRootOfNegative { base: a, degree: b });
        }
        return Ok(-(-a).powf(1.0 / b));
    }
    Ok(a.powf(1.0 / b))
}

fn modulus(a: f64, b: f64) -> OperationResult<f64> {
    if b == 0.0 {
        return Err(OperationError::ModulusByZero);
    }
    Ok(a - b * (a / b).floor())
}

fn int_divide(a: f64, b: f64) -> OperationResult<f64> {
    if b == 0.0 {
        return Err(OperationError::IntegerDivisionByZero);
    }
    Ok((a / b).floor())
}

fn percent(a: f64, b: f64) -> OperationResult<f64> {
    if b == 0.0 {
        return Err(OperationError::ZeroPercentBase);
    }
    Ok(a / b * 100.0)
}

fn abs_diff(a: f64, b: f64) -> OperationResult<f64> {
    Ok((a - b).abs())
}

fn sin(a: f64, _b: f64) -> OperationResult<f64> {
    Ok(a.to_radians().sin())
}

fn cos(a: f64, _b: f64) -> OperationResult<f64> {
    Ok(a.to_radians().cos())
}

fn tan(a: f64, _b: f64) -> OperationResult<f64> {
    Ok(a.to_radians().tan())
}

fn log10(a: f64, _b: f64) -> OperationResult<f64> {
    if a <= 0.0 {
        return Err(OperationError::LogDomain {
            operation: "log".to_string(),
            value: a,
        });
    }
    Ok(a.log10())
}

fn ln(a: f64, _b: f64) -> OperationResult<f64> {
    if a <= 0.0 {
        return Err(OperationError::LogDomain {
            operation: "ln".to_string(),
            value: a,
        });
    }
    Ok(a.ln())
}

fn exp(a: f64, _b: f64) -> OperationResult<f64> {
    Ok(a.exp())
}

fn abs(a: f64, _b: f64) -> OperationResult<f64> {
    Ok(a.abs())
}
