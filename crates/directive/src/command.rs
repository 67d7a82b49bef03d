/// One structured runtime command, produced from a single directive line.
///
/// Commands are built fresh per source line and applied in source order;
/// they are never persisted.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Splice a module script into the host document.
    ImportModule {
        /// Path or URL of the module file.
        path: String,
    },
    /// Splice a classic (non-module) script into the host document.
    ImportScript {
        /// Path or URL of the script file.
        path: String,
    },
    /// Bundle request; reported only.
    BundleFiles {
        /// Destination named by the directive.
        dest: String,
    },
    /// File relocation request; reported only.
    RelocateFile {
        /// Free-form move/rename description.
        info: String,
    },
    /// Insert a media element at a selector.
    LoadMedia {
        /// Element kind, e.g. `img`, `video`, `audio`.
        media_type: String,
        /// Source URL; may contain spaces.
        url: String,
        /// Target selector; a miss falls back to the default insertion point.
        selector: String,
    },
    /// Hand code to the host engine for asynchronous execution.
    RunAsync {
        /// Raw code text, possibly empty.
        code: String,
    },
    /// Register (or overwrite) a component template.
    DefineComponent {
        /// Component name.
        name: String,
        /// Template content, with zero or more `{{name}}` tokens.
        content: String,
    },
    /// Render a previously defined component at a selector.
    RenderComponent {
        /// Component name.
        name: String,
        /// Target selector.
        selector: String,
    },
    /// Evaluate an expression and store the result under a variable name.
    SetVariable {
        /// Variable name.
        name: String,
        /// Unevaluated value expression.
        value: String,
        /// Whether the declaration creates a live, subscribable binding.
        reactive: bool,
    },
}
