//! Client error model.

use thiserror::Error;

/// Result type used across the client crates.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-level error.
///
/// Transport and backend failures are surfaced to the immediate caller
/// unchanged; nothing in this layer retries or swallows them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, timeout...).
    #[error("network error: {0}")]
    Network(String),

    /// The login or registration endpoint answered with a non-2xx status.
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// A CRUD endpoint answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// The persisted session record could not be parsed.
    #[error("malformed persisted session: {0}")]
    MalformedState(String),

    /// The key-value persistence primitive failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// A login completed after a newer login or logout had been issued.
    #[error("superseded by a newer session change")]
    Superseded,
}

impl ClientError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn malformed_state(msg: impl Into<String>) -> Self {
        Self::MalformedState(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
