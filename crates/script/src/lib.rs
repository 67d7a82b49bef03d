//! Engine-agnostic script evaluation facade for the HSX runtime.
//!
//! This crate centralizes the interfaces and value types shared between the
//! runtime core and whatever expression engine the host supplies. The core
//! treats evaluation as an opaque capability: whatever engine is plugged in
//! runs host code with full trust and no sandboxing, so embedders must pass
//! one explicitly; nothing here ever invokes an engine implicitly.

use core::future::Future;
use core::pin::Pin;

/// Script values, stringification, and error/severity types.
pub mod value;
pub use value::{LogLevel, ScriptError, Value};

/// Log routing helpers and the diagnostic sink trait.
pub mod console;
pub use console::{Console, DiagnosticSink, LogDiagnostics};

/// Literal-only default engine.
pub mod literal;
pub use literal::LiteralEngine;

// Reduce type complexity with an alias for the async evaluation future.
pub type EvalFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ScriptError>> + Send + 'a>>;

/// A minimal interface for evaluating expressions on behalf of the runtime.
/// Keep this trait small so engines can be swapped without touching the core.
pub trait ScriptEngine: Send {
    /// Short engine identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Evaluate a single expression and return its value.
    fn evaluate(&mut self, source: &str) -> Result<Value, ScriptError>;

    /// Evaluate a block of code asynchronously. The caller awaits the
    /// returned future before moving on, so engines control suspension.
    fn evaluate_async<'a>(&'a mut self, source: &'a str) -> EvalFuture<'a>;
}
