//! Component templates and their registry.

use std::collections::HashMap;

/// A named content template. The content is plain text with zero or more
/// `{{name}}` placeholder tokens; rendering copies it into the output sink
/// verbatim and binding wires the tokens afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Component name, unique within a runtime instance.
    pub name: String,
    /// Template content.
    pub content: String,
}

/// Mapping from component name to its template. Redefinition overwrites.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the template for `name`.
    pub fn define(&mut self, name: &str, content: &str) {
        self.components.insert(
            name.to_owned(),
            Component {
                name: name.to_owned(),
                content: content.to_owned(),
            },
        );
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Whether `name` has been defined.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Number of defined components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
