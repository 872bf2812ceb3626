//! Persisted Session Store: one current-user record in a key-value store.

use std::sync::Arc;

use stockroom_core::{ClientError, ClientResult};

use crate::{KeyValueStore, User};

/// Key the current user is stored under.
pub const DEFAULT_SESSION_KEY: &str = "currentUser";

/// Saves, loads and clears the serialized current user.
///
/// The stored value is the JSON of a `User`, or the literal `null`.
#[derive(Clone)]
pub struct PersistedSessionStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistedSessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted user.
    ///
    /// Absent key and stored `null` both mean "no session". Unparseable data
    /// is reported as [`ClientError::MalformedState`].
    pub fn load(&self) -> ClientResult<Option<User>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(None);
        };

        serde_json::from_str::<Option<User>>(&raw)
            .map_err(|e| ClientError::malformed_state(format!("{}: {}", self.key, e)))
    }

    pub fn save(&self, user: &User) -> ClientResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| ClientError::storage(format!("failed to serialize user: {e}")))?;
        self.kv.set(&self.key, &raw)
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.kv.remove(&self.key)
    }
}

impl core::fmt::Debug for PersistedSessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PersistedSessionStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
