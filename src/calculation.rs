//! Calculation records and raw operands.
//!
//! A [`Calculation`] is the immutable result of one successful operation.
//! Records are serialized as flat JSON objects with an ISO-8601 timestamp:
//!
//! ```json
//! {"operation":"add","a":2.0,"b":3.0,"result":5.0,"timestamp":"2026-03-01T10:15:00.123+01:00"}
//! ```
//!
//! Deserialization goes through [`RawCalculation`] so that history files
//! written by hand or by older builds (numeric strings, naive timestamps,
//! missing timestamps) still load.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::parse_timestamp;

/// A raw operand as typed by a user or read from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Number(f64::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Number(value as f64)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

/// One computed result.
///
/// Fields are private: once built, a record cannot be changed. Unary
/// operations store `0.0` as the second operand when none was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalculation")]
pub struct Calculation {
    operation: String,
    #[serde(serialize_with = "serialize_number")]
    a: f64,
    #[serde(serialize_with = "serialize_number")]
    b: f64,
    #[serde(serialize_with = "serialize_number")]
    result: f64,
    timestamp: DateTime<Local>,
}

/// JSON has no infinity or NaN; write those as `"inf"`, `"-inf"` and `"NaN"`,
/// which the lenient decoder parses back.
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_infinite() {
        serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
    } else {
        serializer.serialize_f64(*value)
    }
}

impl Calculation {
    /// Build a record stamped with the current local time.
    pub fn new(operation: impl Into<String>, a: f64, b: f64, result: f64) -> Self {
        Self::with_timestamp(operation, a, b, result, Local::now())
    }

    pub fn with_timestamp(
        operation: impl Into<String>,
        a: f64,
        b: f64,
        result: f64,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            operation: operation.into(),
            a,
            b,
            result,
            timestamp,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {} at {}",
            self.operation,
            self.a,
            self.b,
            self.result,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Lenient on-disk shape of a [`Calculation`].
#[derive(Debug, Deserialize)]
pub struct RawCalculation {
    operation: String,
    a: Operand,
    b: Operand,
    result: Operand,
    #[serde(default)]
    timestamp: Option<String>,
}

impl TryFrom<RawCalculation> for Calculation {
    type Error = String;

    fn try_from(raw: RawCalculation) -> Result<Self, Self::Error> {
        let operation = raw.operation.trim().to_lowercase();
        if operation.is_empty() {
            return Err("empty operation name".to_string());
        }

        let a = numeric_field("a", &raw.a)?;
        let b = numeric_field("b", &raw.b)?;
        let result = numeric_field("result", &raw.result)?;

        // Missing timestamps fall back to load time.
        let timestamp = match raw.timestamp.as_deref() {
            Some(ts) => parse_timestamp(ts).ok_or_else(|| format!("invalid timestamp '{ts}'"))?,
            None => Local::now(),
        };

        Ok(Calculation::with_timestamp(operation, a, b, result, timestamp))
    }
}

fn numeric_field(field: &str, value: &Operand) -> Result<f64, String> {
    match value {
        Operand::Number(n) => Ok(*n),
        Operand::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("field '{field}' is not numeric: '{s}'")),
    }
}
