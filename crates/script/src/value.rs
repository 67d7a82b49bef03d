use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// An engine-agnostic representation of script values.
/// This is intentionally small for now; more variants can be added as needed.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `undefined` value, also the sentinel for unbound variables.
    Undefined,
    /// The `null` value.
    Null,
    /// A boolean primitive.
    Boolean(bool),
    /// A number (IEEE 754 double precision).
    Number(f64),
    /// A string value (UTF-8).
    String(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

/// Largest double below which every integral value prints without a
/// fractional part (2^53, the contiguous integer range of an f64).
const INTEGRAL_PRINT_LIMIT: f64 = 9_007_199_254_740_992.0;

impl Display for Value {
    /// The substitution form used when a value replaces a placeholder token.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Number(number) => {
                if number.is_nan() {
                    f.write_str("NaN")
                } else if number.is_infinite() {
                    f.write_str(if *number > 0.0 { "Infinity" } else { "-Infinity" })
                } else if number.fract() == 0.0 && number.abs() < INTEGRAL_PRINT_LIMIT {
                    write!(f, "{}", *number as i64)
                } else {
                    write!(f, "{number}")
                }
            }
            Value::String(value) => f.write_str(value),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Boolean(value),
            serde_json::Value::Number(number) => {
                Value::Number(number.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(value) => Value::String(value),
            // Compound literals stringify to their compact JSON form.
            other => Value::String(other.to_string()),
        }
    }
}

/// Error type used by script engines.
#[derive(Debug)]
pub enum ScriptError {
    /// The source text could not be parsed as an expression.
    SyntaxError(String),
    /// The engine understood the source but cannot evaluate it.
    Unsupported(String),
    /// An internal engine failure not exposed to user code in detail.
    InternalError(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ScriptError::SyntaxError(message) => write!(f, "SyntaxError: {}", message),
            ScriptError::Unsupported(message) => write!(f, "Unsupported: {}", message),
            ScriptError::InternalError(message) => write!(f, "InternalError: {}", message),
        }
    }
}

impl Error for ScriptError {}

/// Log severity levels understood by diagnostic sinks.
#[derive(Copy, Clone, Debug)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
