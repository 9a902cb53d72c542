//! One-shot calculation command.

use console::style;

use crate::calculator::{Calculator, CalculatorResult};
use crate::calculation::Calculation;

/// Evaluate one operation against the persisted history.
pub fn run_calc(
    calculator: &mut Calculator,
    operation: &str,
    a: String,
    b: Option<String>,
) -> CalculatorResult<Calculation> {
    let record = match b {
        Some(b) => calculator.calculate(operation, a, b)?,
        None => calculator.calculate_unary(operation, a)?,
    };
    println!("{}", style(record.result()).bold());
    Ok(record)
}
