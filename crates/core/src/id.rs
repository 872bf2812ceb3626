//! Identifiers used across the client.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Identifier of a user, as assigned by the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Identifier of an inventory item.
///
/// The backend hands out either JSON numbers or JSON strings; the client
/// treats both as opaque. Equality is typed (`1` and `"1"` differ), while
/// [`ItemId::matches_key`] compares string representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(Number),
    Text(String),
}

impl ItemId {
    /// String representation used for key lookups and request bodies.
    pub fn as_key(&self) -> String {
        self.to_string()
    }

    /// True when the string representation of this id equals `key`.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            ItemId::Text(s) => s == key,
            ItemId::Number(n) => n.to_string() == key,
        }
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ItemId::Number(n) => core::fmt::Display::fmt(n, f),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value.into())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Number(value.into())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}
