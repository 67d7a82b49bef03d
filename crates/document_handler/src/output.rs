//! Output sink collaborator interface and the in-memory default.
//!
//! The runtime never touches a page directly: rendered content, media
//! insertion, and script splicing all go through [`OutputSink`]. The sink
//! hands back an [`OutputScope`]: shared text regions the binding engine
//! can scan at bind time and rewrite on variable changes.

use anyhow::{Error, anyhow};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex};

/// One mutable text location inside a rendered scope.
pub type SharedText = Arc<Mutex<String>>;

/// A rendered content region handed back by [`OutputSink::render`].
///
/// Binding scans the regions present at bind time; regions added to a
/// scope afterwards are never matched.
#[derive(Clone, Default)]
pub struct OutputScope {
    /// The textual locations subject to placeholder substitution.
    pub regions: Vec<SharedText>,
}

impl OutputScope {
    /// A scope over the given regions.
    pub fn new(regions: Vec<SharedText>) -> Self {
        Self { regions }
    }

    /// A single-region scope holding `text`; returns the scope and the
    /// region handle for callers that need to inspect it later.
    pub fn from_text(text: &str) -> (Self, SharedText) {
        let region = Arc::new(Mutex::new(text.to_owned()));
        (
            Self {
                regions: vec![Arc::clone(&region)],
            },
            region,
        )
    }
}

/// How an imported script is attached to the host document.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptKind {
    /// An ES module (`type="module"`).
    Module,
    /// A classic script.
    Classic,
}

impl Display for ScriptKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ScriptKind::Module => f.write_str("module"),
            ScriptKind::Classic => f.write_str("classic"),
        }
    }
}

/// A recorded media insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaInsert {
    /// Element kind (`img`, `video`, ...).
    pub media_type: String,
    /// Media source URL.
    pub url: String,
    /// The selector the element was attached under, after fallback.
    pub selector: String,
}

/// Materializes runtime output at named locations.
///
/// Implementations decide what a selector means; the runtime only relies
/// on `render` returning a scope it can bind.
pub trait OutputSink: Send {
    /// Materialize `content` at `selector`, returning the scope to bind.
    fn render(&mut self, content: &str, selector: &str) -> Result<OutputScope, Error>;

    /// Insert a media element. A selector that does not resolve falls back
    /// to the sink's default insertion point; the insertion itself is
    /// always performed.
    fn insert_media(&mut self, media_type: &str, url: &str, selector: &str);

    /// Splice a script file into the host document.
    fn import_script(&mut self, kind: ScriptKind, path: &str);
}

#[derive(Default)]
struct MemoryState {
    /// Latest rendered region per selector. Older regions stay alive for
    /// whatever subscriptions still hold them, but drop out of snapshots,
    /// the way replaced page content keeps detached nodes reachable from
    /// stale callbacks.
    targets: BTreeMap<String, SharedText>,
    media: Vec<MediaInsert>,
    scripts: Vec<(ScriptKind, String)>,
}

/// In-memory [`OutputSink`] used by the CLI and tests.
///
/// Clones share state, so a test can keep a handle while the runtime owns
/// the sink.
#[derive(Clone)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
    default_target: String,
}

impl MemorySink {
    /// A sink whose media fallback target is `body`.
    pub fn new() -> Self {
        Self::with_default_target("body")
    }

    /// A sink with an explicit media fallback target.
    pub fn with_default_target(default_target: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            default_target: default_target.to_owned(),
        }
    }

    /// Current text rendered at `selector`, if any.
    pub fn rendered_text(&self, selector: &str) -> Option<String> {
        let state = self.state.lock().ok()?;
        let region = state.targets.get(selector)?;
        region.lock().ok().map(|text| text.clone())
    }

    /// Snapshot of every rendered selector and its current text.
    pub fn rendered(&self) -> Vec<(String, String)> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };
        state
            .targets
            .iter()
            .filter_map(|(selector, region)| {
                let text = region.lock().ok()?;
                Some((selector.clone(), text.clone()))
            })
            .collect()
    }

    /// Recorded media insertions, in insertion order.
    pub fn media(&self) -> Vec<MediaInsert> {
        self.state
            .lock()
            .map(|state| state.media.clone())
            .unwrap_or_default()
    }

    /// Recorded script imports, in source order.
    pub fn scripts(&self) -> Vec<(ScriptKind, String)> {
        self.state
            .lock()
            .map(|state| state.scripts.clone())
            .unwrap_or_default()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for MemorySink {
    fn render(&mut self, content: &str, selector: &str) -> Result<OutputScope, Error> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("output sink state poisoned"))?;
        let region = Arc::new(Mutex::new(content.to_owned()));
        state.targets.insert(selector.to_owned(), Arc::clone(&region));
        Ok(OutputScope::new(vec![region]))
    }

    fn insert_media(&mut self, media_type: &str, url: &str, selector: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let resolved = if state.targets.contains_key(selector) {
            selector
        } else {
            self.default_target.as_str()
        };
        state.media.push(MediaInsert {
            media_type: media_type.to_owned(),
            url: url.to_owned(),
            selector: resolved.to_owned(),
        });
    }

    fn import_script(&mut self, kind: ScriptKind, path: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.scripts.push((kind, path.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_the_snapshot_for_a_selector() {
        let mut sink = MemorySink::new();
        let first = sink.render("one", "#out").unwrap();
        sink.render("two", "#out").unwrap();

        assert_eq!(sink.rendered_text("#out").as_deref(), Some("two"));
        // The replaced region is still alive for whoever holds it.
        assert_eq!(*first.regions[0].lock().unwrap(), "one");
    }

    #[test]
    fn media_falls_back_to_the_default_target() {
        let mut sink = MemorySink::with_default_target("body");
        sink.render("content", "#gallery").unwrap();

        sink.insert_media("img", "cat.png", "#gallery");
        sink.insert_media("video", "dog.mp4", "#missing");

        let media = sink.media();
        assert_eq!(media[0].selector, "#gallery");
        assert_eq!(media[1].selector, "body");
        assert_eq!(media[1].media_type, "video");
    }

    #[test]
    fn script_imports_record_kind_and_order() {
        let mut sink = MemorySink::new();
        sink.import_script(ScriptKind::Module, "./a.mjs");
        sink.import_script(ScriptKind::Classic, "./b.js");
        assert_eq!(
            sink.scripts(),
            vec![
                (ScriptKind::Module, String::from("./a.mjs")),
                (ScriptKind::Classic, String::from("./b.js")),
            ]
        );
    }
}
