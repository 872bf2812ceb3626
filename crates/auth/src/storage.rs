//! Key-value persistence primitive.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockroom_core::{ClientError, ClientResult};

/// Durable string key-value storage (the role `localStorage` plays in a
/// browser). Each call is atomic on its own; there are no transactions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> ClientResult<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        (**self).remove(key)
    }
}

/// In-memory key-value store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }
}

fn poisoned() -> ClientError {
    ClientError::storage("in-memory store lock poisoned")
}
