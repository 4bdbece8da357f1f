// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;

/// Target type of a declared request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text; strings pass through, anything else goes through [`stringify`].
    Text,
    /// Signed 64-bit integer; accepts integers, finite floats (truncated),
    /// booleans and strings holding a decimal integer.
    Int,
}

/// Why a raw value could not be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("{found} cannot be converted to {target}")]
    Incompatible { target: FieldType, found: &'static str },

    #[error("{0:?} is not a valid integer")]
    InvalidInteger(String),

    #[error("{0} is outside the integer range")]
    OutOfRange(String),
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Int => "int",
        }
    }

    /// Convert `value` to this type.
    pub fn coerce(self, value: &Value) -> Result<Value, CoercionError> {
        match self {
            FieldType::Text => to_text(value),
            FieldType::Int => to_int(value).map(Value::from),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render any JSON value as text.
///
/// Strings are returned as-is, `null` becomes `None` and booleans become
/// `True`/`False`; numbers, arrays and objects use their compact JSON form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn to_text(value: &Value) -> Result<Value, CoercionError> {
    Ok(Value::String(stringify(value)))
}

fn to_int(value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Number(n) => number_to_int(n),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => parse_int(s),
        other => Err(CoercionError::Incompatible { target: FieldType::Int, found: kind(other) }),
    }
}

fn number_to_int(n: &Number) -> Result<i64, CoercionError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    // Beyond i64 range as u64, or a float.
    let f = n
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| CoercionError::OutOfRange(n.to_string()))?;
    let truncated = f.trunc();
    if truncated < -(2f64.powi(63)) || truncated >= 2f64.powi(63) {
        return Err(CoercionError::OutOfRange(n.to_string()));
    }
    Ok(truncated as i64)
}

/// Decimal integer with optional sign, surrounding whitespace and `_`
/// separators between digits.
fn parse_int(raw: &str) -> Result<i64, CoercionError> {
    let invalid = || CoercionError::InvalidInteger(raw.to_string());
    let trimmed = raw.trim();

    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return Err(invalid());
    }

    let cleaned: String = trimmed.chars().filter(|&c| c != '_').collect();
    cleaned.parse::<i64>().map_err(|_| CoercionError::OutOfRange(raw.trim().to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
