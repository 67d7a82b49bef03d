//! End-to-end coverage of document loading, command execution, and
//! reactive projection.

use directive::{Command, parse_line};
use document_handler::{
    DocumentError, HsxRuntime, MemorySink, ScriptKind, UrlSource,
};
use script::{
    DiagnosticSink, EvalFuture, LiteralEngine, LogLevel, ScriptEngine, ScriptError, Value,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;

fn new_runtime() -> (HsxRuntime, MemorySink) {
    common::init_logs();
    let sink = MemorySink::new();
    let runtime = HsxRuntime::new(Box::new(LiteralEngine::new()), Box::new(sink.clone()));
    (runtime, sink)
}

/// Collects reported diagnostics for assertions.
#[derive(Clone, Default)]
struct CollectingDiagnostics {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

impl CollectingDiagnostics {
    fn messages_at(&self, level: &str) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(event_level, _)| event_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, level: LogLevel, message: &str, _context: Option<&str>) {
        let level = match level {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        self.events
            .lock()
            .unwrap()
            .push((level.to_owned(), message.to_owned()));
    }
}

fn directive_command(line: &str) -> Command {
    parse_line(line).expect("directive").expect("well-formed")
}

#[tokio::test]
async fn round_trip_from_definition_to_substitution() {
    let (mut runtime, sink) = new_runtime();
    runtime
        .load(
            "<hsx>\n\
             hsx define component c {{x}}\n\
             hsx render component c to #s\n\
             hsx reactive variable x = \"hi\"\n\
             </hsx>",
        )
        .await
        .unwrap();

    assert_eq!(sink.rendered_text("#s").as_deref(), Some("hi"));
    assert_eq!(runtime.get_variable("x"), Value::String(String::from("hi")));
}

#[tokio::test]
async fn directives_apply_in_source_order_with_live_updates() {
    let (mut runtime, sink) = new_runtime();

    runtime
        .execute(directive_command("hsx define component a x={{v}}"))
        .await
        .unwrap();
    runtime
        .execute(directive_command("hsx render component a to #out"))
        .await
        .unwrap();
    assert_eq!(sink.rendered_text("#out").as_deref(), Some("x={{v}}"));

    runtime
        .execute(directive_command("hsx reactive variable v = 1"))
        .await
        .unwrap();
    assert_eq!(sink.rendered_text("#out").as_deref(), Some("x=1"));

    runtime
        .execute(directive_command("hsx reactive variable v = 2"))
        .await
        .unwrap();
    assert_eq!(sink.rendered_text("#out").as_deref(), Some("x=2"));
}

#[tokio::test]
async fn render_before_define_reports_and_changes_nothing() {
    let (mut runtime, sink) = new_runtime();
    let diagnostics = CollectingDiagnostics::default();
    runtime = runtime.with_diagnostics(Arc::new(diagnostics.clone()));

    runtime
        .execute(directive_command("hsx render component ghost to #out"))
        .await
        .unwrap();

    assert!(sink.rendered().is_empty());
    assert!(runtime.variables().is_empty());
    assert!(runtime.components().is_empty());
    let warnings = diagnostics.messages_at("warn");
    assert!(warnings.iter().any(|m| m.contains("Component not found: ghost")));
}

#[tokio::test]
async fn non_reactive_redeclaration_freezes_bound_output() {
    let (mut runtime, sink) = new_runtime();
    runtime
        .load(
            "<hsx>\n\
             hsx define component a x={{v}}\n\
             hsx render component a to #out\n\
             hsx reactive variable v = 1\n\
             hsx variable v = 2\n\
             </hsx>",
        )
        .await
        .unwrap();

    // The plain re-declaration replaced the cell, so the bound location
    // keeps its last rendered text while reads see the new value.
    assert_eq!(sink.rendered_text("#out").as_deref(), Some("x=1"));
    assert_eq!(runtime.get_variable("v"), Value::Number(2.0));
    assert!(!runtime.variables().is_reactive("v"));
}

#[tokio::test]
async fn malformed_directives_do_not_stop_the_batch() {
    let (mut runtime, sink) = new_runtime();
    let diagnostics = CollectingDiagnostics::default();
    runtime = runtime.with_diagnostics(Arc::new(diagnostics.clone()));

    runtime
        .load(
            "<hsx>\n\
             hsx set variable\n\
             plain markup, ignored without comment\n\
             hsx define component a ok\n\
             hsx render component a to #out\n\
             </hsx>",
        )
        .await
        .unwrap();

    assert_eq!(sink.rendered_text("#out").as_deref(), Some("ok"));
    let warnings = diagnostics.messages_at("warn");
    assert!(warnings.iter().any(|m| m.contains("Failed to parse HSX line")));
}

#[tokio::test]
async fn failed_evaluation_leaves_the_store_unchanged() {
    let (mut runtime, _sink) = new_runtime();
    let diagnostics = CollectingDiagnostics::default();
    runtime = runtime.with_diagnostics(Arc::new(diagnostics.clone()));

    runtime
        .load(
            "<hsx>\n\
             hsx variable x = compute()\n\
             hsx variable y = 5\n\
             </hsx>",
        )
        .await
        .unwrap();

    assert!(!runtime.variables().contains("x"));
    assert_eq!(runtime.get_variable("x"), Value::Undefined);
    assert_eq!(runtime.get_variable("y"), Value::Number(5.0));
    let errors = diagnostics.messages_at("error");
    assert!(errors.iter().any(|m| m.contains("Error executing HSX runtime command")));
}

#[tokio::test]
async fn rebinding_the_same_scope_duplicates_subscriptions() {
    let (mut runtime, _sink) = new_runtime();
    runtime
        .execute(directive_command("hsx define component a {{v}}"))
        .await
        .unwrap();
    runtime
        .execute(directive_command("hsx render component a to #out"))
        .await
        .unwrap();
    runtime
        .execute(directive_command("hsx render component a to #out"))
        .await
        .unwrap();

    // Each render re-binds; the first scope's subscription is never
    // removed even though its region left the snapshot.
    let cell = runtime.variables().reactive_cell("v").unwrap();
    assert_eq!(cell.lock().unwrap().subscriber_count(), 2);
}

#[tokio::test]
async fn missing_wrapper_is_fatal() {
    let (mut runtime, sink) = new_runtime();
    let result = runtime.load("hsx variable x = 1").await;
    assert!(matches!(result, Err(DocumentError::MissingWrapper)));
    assert!(sink.rendered().is_empty());
}

#[tokio::test]
async fn imports_and_media_reach_the_sink_in_order() {
    let (mut runtime, sink) = new_runtime();
    runtime
        .load(
            "<hsx>\n\
             hsx exist import correct file ./widgets.mjs\n\
             hsx exist import simple file ./legacy.js\n\
             hsx file import all to dist/\n\
             hsx define component gallery <div>art</div>\n\
             hsx render component gallery to #gallery\n\
             hsx media load img from cat.png to #gallery\n\
             hsx media load audio from purr.ogg to #missing\n\
             </hsx>",
        )
        .await
        .unwrap();

    assert_eq!(
        sink.scripts(),
        vec![
            (ScriptKind::Module, String::from("./widgets.mjs")),
            (ScriptKind::Classic, String::from("./legacy.js")),
        ]
    );
    let media = sink.media();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0].selector, "#gallery");
    // The unresolved selector fell back to the default insertion point.
    assert_eq!(media[1].selector, "body");
}

/// Engine that records evaluation order and settles async work late.
struct RecordingEngine {
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptEngine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn evaluate(&mut self, source: &str) -> Result<Value, ScriptError> {
        self.log.lock().unwrap().push(format!("eval {source}"));
        Ok(Value::Number(1.0))
    }

    fn evaluate_async<'a>(&'a mut self, source: &'a str) -> EvalFuture<'a> {
        let log = Arc::clone(&self.log);
        let source = source.to_owned();
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            log.lock().unwrap().push(format!("async {source}"));
            Ok(Value::Undefined)
        })
    }
}

#[tokio::test]
async fn async_commands_settle_before_later_ones_start() {
    common::init_logs();
    let log = Arc::new(Mutex::new(Vec::new()));
    let engine = RecordingEngine {
        log: Arc::clone(&log),
    };
    let mut runtime = HsxRuntime::new(Box::new(engine), Box::new(MemorySink::new()));

    runtime
        .load(
            "<hsx>\n\
             hsx run async tick()\n\
             hsx variable after = 1\n\
             </hsx>",
        )
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![String::from("async tick()"), String::from("eval 1")]
    );
}

#[tokio::test]
async fn documents_load_from_file_urls() {
    let (mut runtime, sink) = new_runtime();
    let fixture = common::fixtures_dir().join("counter.hsx");
    let url = common::to_file_url(&fixture).unwrap();

    runtime.load_url(&url, &UrlSource::new()).await.unwrap();

    assert_eq!(
        sink.rendered_text("#app").as_deref(),
        Some("<p>clicks: 0</p>")
    );
    let media = sink.media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].selector, "body");
}

#[tokio::test]
async fn fetch_failures_surface_as_document_errors() {
    let (mut runtime, _sink) = new_runtime();
    let fixture = common::fixtures_dir().join("does-not-exist.hsx");
    let url = common::to_file_url(&fixture).unwrap();

    let result = runtime.load_url(&url, &UrlSource::new()).await;
    assert!(matches!(result, Err(DocumentError::Fetch(_))));
}
