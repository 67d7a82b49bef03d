//! Command execution for [`HsxRuntime`].
//!
//! Each command application is one atomic transition against the owned
//! stores plus a diagnostic report. There is no rollback: a failing
//! command leaves every earlier mutation intact.

use crate::output::ScriptKind;
use crate::state::HsxRuntime;
use anyhow::{Error, anyhow};
use directive::Command;
use script::LogLevel;

impl HsxRuntime {
    /// Apply one command.
    ///
    /// Commands from a batch must be applied strictly in parse order; an
    /// asynchronous command suspends this future until the host engine
    /// settles, so no later command starts early. The returned error is
    /// local to this command; callers report it and continue.
    pub async fn execute(&mut self, command: Command) -> Result<(), Error> {
        match command {
            Command::SetVariable {
                name,
                value,
                reactive,
            } => {
                // A failed evaluation leaves the store untouched.
                let evaluated = self
                    .engine
                    .evaluate(&value)
                    .map_err(|error| anyhow!("cannot evaluate value for variable {name}: {error}"))?;
                self.variables.set(&name, evaluated, reactive);
                let kind = if reactive { "reactive " } else { "" };
                self.diagnostics.report(
                    LogLevel::Info,
                    &format!("Set {kind}variable {name}"),
                    None,
                );
            }
            Command::DefineComponent { name, content } => {
                self.components.define(&name, &content);
                self.diagnostics
                    .report(LogLevel::Info, &format!("Defined component {name}"), None);
            }
            Command::RenderComponent { name, selector } => {
                self.render_component(&name, &selector)?;
            }
            Command::RunAsync { code } => {
                self.diagnostics
                    .report(LogLevel::Info, &format!("Running async code: {code}"), None);
                // Await the engine before advancing; the result value is
                // discarded and a failure only costs a report.
                if let Err(error) = self.engine.evaluate_async(&code).await {
                    self.diagnostics.report(
                        LogLevel::Error,
                        &format!("Async execution failed: {error}"),
                        Some(&code),
                    );
                }
            }
            Command::LoadMedia {
                media_type,
                url,
                selector,
            } => {
                self.sink.insert_media(&media_type, &url, &selector);
                self.diagnostics.report(
                    LogLevel::Info,
                    &format!("Loaded {media_type} from {url}"),
                    None,
                );
            }
            Command::ImportModule { path } => {
                self.sink.import_script(ScriptKind::Module, &path);
                self.diagnostics.report(
                    LogLevel::Info,
                    &format!("Imported file module {path}"),
                    None,
                );
            }
            Command::ImportScript { path } => {
                self.sink.import_script(ScriptKind::Classic, &path);
                self.diagnostics.report(
                    LogLevel::Info,
                    &format!("Imported simple file {path}"),
                    None,
                );
            }
            Command::BundleFiles { dest } => {
                self.diagnostics.report(
                    LogLevel::Info,
                    &format!("Bundling all files to {dest}"),
                    None,
                );
            }
            Command::RelocateFile { info } => {
                self.diagnostics
                    .report(LogLevel::Info, &format!("Rename/move {info}"), None);
            }
        }
        Ok(())
    }

    /// Render a defined component at `selector` and bind the fresh scope.
    ///
    /// An unknown name is reported and changes nothing, neither output
    /// nor runtime state.
    pub fn render_component(&mut self, name: &str, selector: &str) -> Result<(), Error> {
        let Some(component) = self.components.get(name) else {
            self.diagnostics
                .report(LogLevel::Warn, &format!("Component not found: {name}"), None);
            return Ok(());
        };
        let content = component.content.clone();
        let scope = self.sink.render(&content, selector)?;
        self.bind_reactivity(&scope);
        self.diagnostics.report(
            LogLevel::Info,
            &format!("Rendered component {name} to {selector}"),
            None,
        );
        Ok(())
    }
}
