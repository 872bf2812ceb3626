//! Local CRUD store: an in-memory item list shaped like the remote API.
//!
//! Items are kept in arrival order. Mutation goes through `&mut self`, so the
//! store has exactly one writer at a time; share it behind a lock if several
//! callers need it.
//!
//! Known gaps, covered by tests:
//! - `add` does not check for an existing id;
//! - `update` returns its input even when no stored item matched.

use stockroom_core::Entity;

use crate::Item;

/// Local store of inventory items.
pub type LocalItemStore = LocalStore<Item>;

/// Ordered in-memory collection of entities.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStore<T> {
    items: Vec<T>,
}

impl<T> Default for LocalStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> LocalStore<T>
where
    T: Entity + Clone,
    T::Id: core::fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all items in arrival order.
    pub fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Append `item` and hand it back.
    pub fn add(&mut self, item: T) -> T {
        self.items.push(item.clone());
        item
    }

    /// Replace the first item whose id equals `item.id()`, keeping its
    /// position. Returns `item` whether or not anything was replaced.
    pub fn update(&mut self, item: T) -> T {
        if let Some(slot) = self.items.iter_mut().find(|i| i.id() == item.id()) {
            *slot = item.clone();
        }
        item
    }

    /// Remove the first item whose id, as a string, equals `id`.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.items.iter().position(|i| i.id().to_string() == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
