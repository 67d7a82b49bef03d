//! Document handler subsystem for the HSX runtime.
//!
//! This crate orchestrates directive parsing, command execution, and
//! reactive binding for a single HSX document. It owns the variable store
//! and component registry, drives the host-supplied script engine and
//! output sink, and keeps rendered scopes wired to reactive variables so
//! later assignments rewrite the projected text.

/// Placeholder discovery and subscription wiring for rendered scopes
mod binding;
pub mod components;
pub mod config;
pub mod error;
/// Command execution methods (integrated into state.rs's runtime type)
mod interpreter;
pub mod output;
/// Document fetching over http(s) and file URLs
pub mod source;
pub mod state;

pub use components::{Component, ComponentRegistry};
pub use config::RuntimeConfig;
pub use error::DocumentError;
pub use output::{MediaInsert, MemorySink, OutputScope, OutputSink, ScriptKind, SharedText};
pub use source::{DocumentSource, UrlSource};
pub use state::HsxRuntime;
