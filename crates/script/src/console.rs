//! Diagnostic routing for the HSX runtime.
//!
//! This module centralizes output from command execution and script engines.
//! For now, it prints using the `log` crate.

use crate::value::LogLevel;
use log::{debug, error, info, trace, warn};

/// Console provides helper functions to print messages emitted by the
/// runtime and its engines. This keeps output routing in one place so it
/// can later be swapped to a different backend.
pub struct Console;

impl Console {
    /// Print a generic log line.
    #[inline]
    pub fn log<M: AsRef<str>>(message: M) {
        info!("[HSX]: {}", message.as_ref());
    }

    /// Print an informational line.
    #[inline]
    pub fn info<M: AsRef<str>>(message: M) {
        info!("[HSX]: {}", message.as_ref());
    }

    /// Print a warning line.
    #[inline]
    pub fn warn<M: AsRef<str>>(message: M) {
        warn!("[HSX]: {}", message.as_ref());
    }

    /// Print an error line.
    #[inline]
    pub fn error<M: AsRef<str>>(message: M) {
        error!("[HSX]: {}", message.as_ref());
    }
}

/// Receives informational, warning, and error events from the runtime.
///
/// The runtime reports through this trait and never aborts based on a
/// diagnostic alone; sinks are free to collect, print, or drop events.
pub trait DiagnosticSink: Send + Sync {
    /// Report one event. `context` carries the offending source line or
    /// command description when one exists.
    fn report(&self, level: LogLevel, message: &str, context: Option<&str>);
}

/// A `DiagnosticSink` implementation that routes to the `log` crate.
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    #[inline]
    fn report(&self, level: LogLevel, message: &str, context: Option<&str>) {
        match (level, context) {
            (LogLevel::Trace, Some(context)) => trace!("{message} ({context})"),
            (LogLevel::Trace, None) => trace!("{message}"),
            (LogLevel::Debug, Some(context)) => debug!("{message} ({context})"),
            (LogLevel::Debug, None) => debug!("{message}"),
            (LogLevel::Info, Some(context)) => info!("{message} ({context})"),
            (LogLevel::Info, None) => info!("{message}"),
            (LogLevel::Warn, Some(context)) => warn!("{message} ({context})"),
            (LogLevel::Warn, None) => warn!("{message}"),
            (LogLevel::Error, Some(context)) => error!("{message} ({context})"),
            (LogLevel::Error, None) => error!("{message}"),
        }
    }
}
