//! The runtime instance: owned state, document loading, and the public
//! variable/component API.

use crate::binding;
use crate::components::ComponentRegistry;
use crate::config::RuntimeConfig;
use crate::error::DocumentError;
use crate::output::{OutputScope, OutputSink};
use crate::source::DocumentSource;
use directive::parser::parse_line;
use reactive::VariableStore;
use script::{DiagnosticSink, LogDiagnostics, LogLevel, ScriptEngine, Value};
use std::sync::Arc;
use url::Url;

/// One HSX runtime instance.
///
/// Owns the variable store and component registry exclusively; nothing is
/// process-global and nothing starts implicitly. Hosts construct an
/// instance with the script engine and output sink of their choice and
/// call [`load`] explicitly. The instance is built for a single logical
/// sequence of operations and is not meant for concurrent mutation from
/// several flows.
///
/// The script engine is a full-trust capability: whatever it executes runs
/// with the host's authority, unsandboxed.
///
/// [`load`]: HsxRuntime::load
pub struct HsxRuntime {
    pub(crate) config: RuntimeConfig,
    pub(crate) variables: VariableStore<Value>,
    pub(crate) components: ComponentRegistry,
    pub(crate) engine: Box<dyn ScriptEngine>,
    pub(crate) sink: Box<dyn OutputSink>,
    pub(crate) diagnostics: Arc<dyn DiagnosticSink>,
}

impl HsxRuntime {
    /// Create a runtime with default configuration and `log`-backed
    /// diagnostics.
    pub fn new(engine: Box<dyn ScriptEngine>, sink: Box<dyn OutputSink>) -> Self {
        Self::with_config(engine, sink, RuntimeConfig::default())
    }

    /// Create a runtime with explicit configuration.
    pub fn with_config(
        engine: Box<dyn ScriptEngine>,
        sink: Box<dyn OutputSink>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            config,
            variables: VariableStore::new(),
            components: ComponentRegistry::new(),
            engine,
            sink,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Bind `name` directly, bypassing expression evaluation.
    pub fn set_variable(&mut self, name: &str, value: Value, reactive: bool) {
        self.variables.set(name, value, reactive);
    }

    /// Current value of `name`; `Value::Undefined` when unbound.
    pub fn get_variable(&self, name: &str) -> Value {
        self.variables.get(name)
    }

    /// Register (or overwrite) a component template.
    pub fn define_component(&mut self, name: &str, content: &str) {
        self.components.define(name, content);
    }

    /// The variable store, for inspection.
    pub fn variables(&self) -> &VariableStore<Value> {
        &self.variables
    }

    /// The component registry, for inspection.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Wire reactive variables to placeholder tokens in `scope`.
    ///
    /// Calling this twice for the same scope duplicates subscriptions;
    /// subscriber lists only grow, bounded by the configured cap.
    pub fn bind_reactivity(&mut self, scope: &OutputScope) {
        binding::bind_scope(scope, &mut self.variables, self.config.max_subscribers);
    }

    /// Interpret HSX source text.
    ///
    /// The text must carry an `<hsx ...>...</hsx>` wrapper; its absence is
    /// the one fatal error. Inside, directive lines execute strictly in
    /// source order, one at a time; parse and execution failures are
    /// reported and skipped without aborting the load.
    pub async fn load(&mut self, source_text: &str) -> Result<(), DocumentError> {
        let inner = extract_wrapper(source_text).ok_or(DocumentError::MissingWrapper)?;
        // Commands run as they parse so each sees every earlier effect.
        for raw_line in inner.lines() {
            let line = raw_line.trim();
            match parse_line(line) {
                None => {}
                Some(Err(error)) => {
                    self.diagnostics.report(
                        LogLevel::Warn,
                        &format!("Failed to parse HSX line: {error}"),
                        Some(line),
                    );
                }
                Some(Ok(command)) => {
                    if let Err(error) = self.execute(command).await {
                        self.diagnostics.report(
                            LogLevel::Error,
                            &format!("Error executing HSX runtime command: {error}"),
                            Some(line),
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Fetch a document through `source`, then [`load`] it.
    ///
    /// [`load`]: HsxRuntime::load
    pub async fn load_url(
        &mut self,
        url: &Url,
        source: &dyn DocumentSource,
    ) -> Result<(), DocumentError> {
        let text = source.fetch_text(url).await?;
        self.load(&text).await
    }
}

/// Inner text of the first `<hsx ...>` tag through the last `</hsx>`,
/// matched case-insensitively.
fn extract_wrapper(source: &str) -> Option<&str> {
    let lower = source.to_ascii_lowercase();
    let open = lower.find("<hsx")?;
    let open_end = open + lower[open..].find('>')?;
    let close = lower.rfind("</hsx>")?;
    if close <= open_end {
        return None;
    }
    Some(&source[open_end + 1..close])
}
