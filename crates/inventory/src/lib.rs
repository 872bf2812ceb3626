//! Inventory items and the local (backend-free) item store.
//!
//! Pure in-process logic: no IO, no HTTP, no storage.

pub mod item;
pub mod store;

pub use item::Item;
pub use store::{LocalItemStore, LocalStore};
