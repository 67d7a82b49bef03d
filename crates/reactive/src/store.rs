//! Name-keyed storage over plain values and reactive cells.

use crate::cell::{ReactiveCell, SharedCell};
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// What a variable name currently resolves to.
///
/// The two kinds are kept as an explicit tagged variant so callers never
/// have to inspect the stored value itself to learn whether it is live.
pub enum Slot<V> {
    /// A raw value with no change propagation.
    Plain(V),
    /// A shared reactive cell; reads unwrap its current value.
    Reactive(SharedCell<V>),
}

/// Mapping from variable name to a [`Slot`].
///
/// Re-declaration semantics, which the interpreter relies on:
/// - A non-reactive `set` always replaces the slot wholesale. If the name
///   previously held a reactive cell, that cell and all of its subscribers
///   are dropped silently and bound output freezes at its last text.
/// - A reactive `set` assigns through an existing cell, so subscriptions
///   made before the assignment observe the new value. Only when the name
///   is unbound (or plain) does it install a fresh cell.
pub struct VariableStore<V> {
    variables: HashMap<String, Slot<V>>,
}

impl<V> Default for VariableStore<V> {
    fn default() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }
}

impl<V> VariableStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` according to the re-declaration semantics above.
    pub fn set(&mut self, name: &str, value: V, reactive: bool) {
        if !reactive {
            self.variables.insert(name.to_owned(), Slot::Plain(value));
            return;
        }
        if let Some(Slot::Reactive(cell)) = self.variables.get(name) {
            if let Ok(mut guard) = cell.lock() {
                guard.set(value);
                return;
            }
            warn!("Replacing poisoned reactive cell for variable {name}");
        }
        self.variables
            .insert(name.to_owned(), Slot::Reactive(ReactiveCell::shared(value)));
    }

    /// Current value of `name`, unwrapping reactive cells.
    ///
    /// Unbound names resolve to the `undefined` sentinel, `V::default()`.
    pub fn get(&self, name: &str) -> V
    where
        V: Clone + Default,
    {
        match self.variables.get(name) {
            Some(Slot::Plain(value)) => value.clone(),
            Some(Slot::Reactive(cell)) => cell
                .lock()
                .map(|guard| guard.get().clone())
                .unwrap_or_default(),
            None => V::default(),
        }
    }

    /// Whether `name` is bound at all.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Whether `name` currently resolves to a reactive cell.
    pub fn is_reactive(&self, name: &str) -> bool {
        matches!(self.variables.get(name), Some(Slot::Reactive(_)))
    }

    /// The cell behind `name`, if it is reactive.
    pub fn reactive_cell(&self, name: &str) -> Option<SharedCell<V>> {
        match self.variables.get(name) {
            Some(Slot::Reactive(cell)) => Some(Arc::clone(cell)),
            _ => None,
        }
    }

    /// Names currently bound to reactive cells.
    pub fn reactive_names(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Reactive(_) => Some(name.clone()),
                Slot::Plain(_) => None,
            })
            .collect()
    }

    /// The cell for `name`, installing a fresh default-valued cell when the
    /// name is unbound so subscriptions can be wired before the first
    /// assignment. Returns `None` for names bound to plain values: those
    /// never participate in change propagation.
    pub fn bind_reactive(&mut self, name: &str) -> Option<SharedCell<V>>
    where
        V: Default,
    {
        match self.variables.get(name) {
            Some(Slot::Reactive(cell)) => Some(Arc::clone(cell)),
            Some(Slot::Plain(_)) => None,
            None => {
                let cell = ReactiveCell::shared(V::default());
                self.variables
                    .insert(name.to_owned(), Slot::Reactive(Arc::clone(&cell)));
                Some(cell)
            }
        }
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
