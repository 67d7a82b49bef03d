//! The atomic unit of reactivity: one mutable value plus its subscribers.

use anyhow::Error;
use log::warn;
use std::sync::{Arc, Mutex};

/// A change callback invoked with the freshly stored value.
///
/// Callbacks are fallible so a misbehaving subscriber can be isolated
/// instead of poisoning the whole notification pass.
pub type Subscriber<V> = Box<dyn FnMut(&V) -> Result<(), Error> + Send>;

/// A cell shared between the store and any number of bound scopes.
pub type SharedCell<V> = Arc<Mutex<ReactiveCell<V>>>;

/// Holds one mutable value and an ordered list of change subscribers.
///
/// Subscribers run in subscription order, synchronously, on every [`set`]
/// call. A subscriber that returns an error is reported and skipped; the
/// remaining subscribers are still notified with the same value. Cells are
/// never torn down: once created they live as long as the runtime instance
/// that owns them.
///
/// [`set`]: ReactiveCell::set
pub struct ReactiveCell<V> {
    value: V,
    subscribers: Vec<Subscriber<V>>,
}

impl<V> ReactiveCell<V> {
    /// Create a cell holding `value` with no subscribers.
    pub fn new(value: V) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    /// Wrap a fresh cell for sharing across scopes.
    pub fn shared(value: V) -> SharedCell<V> {
        Arc::new(Mutex::new(Self::new(value)))
    }

    /// The current value.
    pub fn get(&self) -> &V {
        &self.value
    }

    /// Store `value` and notify every subscriber, in subscription order.
    pub fn set(&mut self, value: V) {
        self.value = value;
        for subscriber in &mut self.subscribers {
            if let Err(error) = subscriber(&self.value) {
                warn!("Subscriber failed during change notification: {error}");
            }
        }
    }

    /// Append a subscriber. Subscribers are only ever added, never removed.
    pub fn subscribe(&mut self, subscriber: Subscriber<V>) {
        self.subscribers.push(subscriber);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
