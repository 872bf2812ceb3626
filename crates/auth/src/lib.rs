//! `stockroom-auth`: client-side session and authorization state.
//!
//! This crate is intentionally decoupled from HTTP and storage: the backend
//! and the persistence primitive are traits implemented by the caller.

pub mod backend;
pub mod broadcast;
pub mod credentials;
pub mod guard;
pub mod roles;
pub mod session;
pub mod session_store;
pub mod storage;
pub mod user;

pub use backend::AuthBackend;
pub use broadcast::{LatestBroadcast, Subscription};
pub use credentials::{AuthResponse, Credentials, Registration};
pub use guard::{AdminGuard, LOGIN_ROUTE, Navigator, RecordingNavigator};
pub use roles::Role;
pub use session::{Session, SessionManager};
pub use session_store::{DEFAULT_SESSION_KEY, PersistedSessionStore};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
pub use user::User;
