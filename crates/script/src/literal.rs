//! Literal-only default engine.
//!
//! `LiteralEngine` evaluates the subset of expressions that are plain
//! literals (numbers, quoted strings, booleans, `null`, `undefined`, and
//! JSON arrays/objects) and rejects everything else. It is the
//! dependency-light default for builds and tests that do not embed a real
//! host engine; anything needing actual code execution must be supplied by
//! the embedder through the [`ScriptEngine`] trait.

use crate::value::{ScriptError, Value};
use crate::{Console, EvalFuture, ScriptEngine};

/// Evaluates literal expressions only; asynchronous code is skipped.
#[derive(Default)]
pub struct LiteralEngine;

impl LiteralEngine {
    /// Create a new literal engine.
    pub fn new() -> Self {
        Self
    }
}

impl ScriptEngine for LiteralEngine {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn evaluate(&mut self, source: &str) -> Result<Value, ScriptError> {
        let trimmed = source.trim().trim_end_matches(';').trim_end();
        if trimmed.is_empty() {
            return Err(ScriptError::SyntaxError(String::from("empty expression")));
        }
        if trimmed == "undefined" {
            return Ok(Value::Undefined);
        }
        // Single-quoted strings are accepted alongside JSON's double quotes.
        if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
            let inner = &trimmed[1..trimmed.len() - 1];
            if !inner.contains('\'') {
                return Ok(Value::String(inner.to_owned()));
            }
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(json) => Ok(Value::from(json)),
            Err(_) => Err(ScriptError::Unsupported(format!(
                "expression requires a host script engine: {trimmed}"
            ))),
        }
    }

    fn evaluate_async<'a>(&'a mut self, source: &'a str) -> EvalFuture<'a> {
        // No host engine: report the skip and settle immediately so the
        // command sequence keeps its ordering guarantees.
        Console::warn(format!(
            "asynchronous code requires a host script engine; skipping: {}",
            source.trim()
        ));
        Box::pin(core::future::ready(Ok(Value::Undefined)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Result<Value, ScriptError> {
        LiteralEngine::new().evaluate(source)
    }

    #[test]
    fn evaluates_scalar_literals() {
        assert_eq!(eval("5").unwrap(), Value::Number(5.0));
        assert_eq!(eval("-2.5").unwrap(), Value::Number(-2.5));
        assert_eq!(eval("true").unwrap(), Value::Boolean(true));
        assert_eq!(eval("null").unwrap(), Value::Null);
        assert_eq!(eval("undefined").unwrap(), Value::Undefined);
    }

    #[test]
    fn evaluates_quoted_strings() {
        assert_eq!(eval("\"hello\"").unwrap(), Value::String(String::from("hello")));
        assert_eq!(eval("'hello'").unwrap(), Value::String(String::from("hello")));
        assert_eq!(eval("  'pad' ;").unwrap(), Value::String(String::from("pad")));
    }

    #[test]
    fn compound_literals_stringify() {
        assert_eq!(
            eval("{\"a\": 1}").unwrap(),
            Value::String(String::from("{\"a\":1}"))
        );
    }

    #[test]
    fn non_literals_are_rejected() {
        assert!(matches!(eval("1 + 2"), Err(ScriptError::Unsupported(_))));
        assert!(matches!(eval("fetchData()"), Err(ScriptError::Unsupported(_))));
        assert!(matches!(eval("   "), Err(ScriptError::SyntaxError(_))));
    }

    #[tokio::test]
    async fn async_evaluation_settles_to_undefined() {
        let mut engine = LiteralEngine::new();
        let value = engine.evaluate_async("doWork()").await;
        assert_eq!(value.unwrap(), Value::Undefined);
    }
}
