//! Reactive variable primitives shared across the HSX runtime.
//!
//! This crate centralizes the two building blocks the rest of the runtime is
//! written against: a single mutable value with ordered change subscribers
//! ([`ReactiveCell`]), and a name-to-slot mapping that distinguishes plain
//! values from reactive cells ([`VariableStore`]). Both are generic over the
//! stored value type so they stay independent of any particular script-value
//! representation.

/// Single-value reactive cell with ordered, synchronous subscribers.
pub mod cell;
pub use cell::{ReactiveCell, SharedCell, Subscriber};

/// Name-to-value mapping over plain and reactive slots.
pub mod store;
pub use store::{Slot, VariableStore};
