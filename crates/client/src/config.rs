//! Client configuration: environment variables with defaults.

use std::path::PathBuf;

use stockroom_auth::DEFAULT_SESSION_KEY;
use stockroom_core::{ClientError, ClientResult};

pub const API_URL_ENV: &str = "STOCKROOM_API_URL";
pub const DATA_DIR_ENV: &str = "STOCKROOM_DATA_DIR";
pub const SESSION_KEY_ENV: &str = "STOCKROOM_SESSION_KEY";

pub const DEFAULT_API_URL: &str = "http://localhost/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the `endpoints/*.php` paths are resolved against.
    pub api_url: String,
    /// Directory holding the persisted session.
    pub data_dir: PathBuf,
    /// Key the current user is persisted under.
    pub session_key: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            data_dir: data_dir.into(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Read `STOCKROOM_API_URL`, `STOCKROOM_DATA_DIR` and
    /// `STOCKROOM_SESSION_KEY`, falling back to defaults.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let session_key =
            lookup(SESSION_KEY_ENV).unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string());

        Ok(Self {
            api_url: normalize_url(api_url),
            data_dir,
            session_key,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = normalize_url(api_url.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// `{app_data_dir}/stockroom`.
fn default_data_dir() -> ClientResult<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or_else(|| {
            ClientError::storage("failed to resolve OS app data directory - set STOCKROOM_DATA_DIR")
        })?;

    dir.push("stockroom");
    Ok(dir)
}
