//! `stockroom-client`
//!
//! **Responsibility:** concrete collaborators for the Stockroom client.
//!
//! This crate provides:
//! - Configuration from the environment
//! - A reqwest-backed API client, remote item CRUD and the HTTP auth backend
//! - A file-backed key-value store for the persisted session
//! - `AppState` wiring used by the `stockroom` CLI
//!
//! The backend remains the authority for items; the client keeps no cache.

pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod items;
pub mod storage;

pub use app::{AppState, TracingNavigator};
pub use auth::HttpAuthBackend;
pub use config::ClientConfig;
pub use http::ApiClient;
pub use items::RemoteItemClient;
pub use storage::FileKeyValueStore;
