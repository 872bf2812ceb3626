//! File-backed key-value store.
//!
//! One file per key under a data directory. Writes go to a temporary file in
//! the same directory which is then renamed over the target, so a crash never
//! leaves a half-written value behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use stockroom_auth::KeyValueStore;
use stockroom_core::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> ClientResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(ClientError::storage(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::storage(format!("failed to read {path:?}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            ClientError::storage(format!("failed to create data directory {:?}: {e}", self.dir))
        })?;

        let write_error =
            |e: std::io::Error| ClientError::storage(format!("failed to write {path:?}: {e}"));

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        temp.write_all(value.as_bytes()).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(&path).map_err(|e| write_error(e.error))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::storage(format!("failed to remove {path:?}: {e}"))),
        }
    }
}
