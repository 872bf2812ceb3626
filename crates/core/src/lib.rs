//! `stockroom-core`: building blocks shared by every client crate.
//!
//! This crate contains **pure** primitives (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{ClientError, ClientResult};
pub use id::{ItemId, UserId};
