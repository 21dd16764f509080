//! Parsing of numeric path segments.

use serde_json::Value;
use service_core::error::AppError;

pub const NOT_A_NUMBER: &str = "Not a number";

/// Parses a path segment as a finite number, ignoring surrounding whitespace.
pub fn parse_number(raw: &str) -> Result<f64, AppError> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(AppError::bad_request(NOT_A_NUMBER)),
    }
}

/// Parses a user id segment.
///
/// Returns `Ok(None)` for numbers that cannot be a user id (fractions or
/// values outside `i64`); callers answer those with 404 rather than 400.
pub fn parse_user_id(raw: &str) -> Result<Option<i64>, AppError> {
    let n = parse_number(raw)?;
    if n.fract() != 0.0 || n < i64::MIN as f64 || n > i64::MAX as f64 {
        return Ok(None);
    }
    Ok(Some(n as i64))
}

/// JSON number for `n`, written without a fractional part when it has none.
pub fn numeric_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
