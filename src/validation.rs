//! Operand validation.
//!
//! Converts raw operands into bounded `f64` values. Only the magnitude is
//! checked here; domain rules such as "no zero divisor" belong to the
//! operation registry.

use thiserror::Error;

use crate::calculation::Operand;

/// Default ceiling for operand magnitudes.
pub const DEFAULT_MAX_INPUT: f64 = 1e12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid numerical input: '{input}'")]
    NotANumber { input: String },

    #[error("Input '{input}' is not a finite number")]
    NotFinite { input: String },

    #[error("Input {value} exceeds max allowed {max}")]
    OutOfRange { value: f64, max: f64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates raw operands against a magnitude ceiling.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    max_input: f64,
}

impl InputValidator {
    pub fn new(max_input: f64) -> Self {
        Self { max_input }
    }

    pub fn max_input(&self) -> f64 {
        self.max_input
    }

    /// Convert `raw` to a number, rejecting unparseable or oversized input.
    pub fn validate(&self, raw: &Operand) -> ValidationResult<f64> {
        let value = match raw {
            Operand::Number(n) => *n,
            Operand::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NotANumber {
                        input: s.clone(),
                    })?
            }
        };

        if value.is_nan() {
            return Err(ValidationError::NotFinite {
                input: raw.to_string(),
            });
        }
        if value.abs() > self.max_input {
            return Err(ValidationError::OutOfRange {
                value,
                max: self.max_input,
            });
        }
        Ok(value)
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT)
    }
}
