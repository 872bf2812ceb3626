use std::sync::Arc;

use async_trait::async_trait;

use stockroom_core::ClientResult;

use crate::{AuthResponse, Credentials, Registration};

/// Remote authentication endpoint.
///
/// Implementations issue exactly one request per call and surface transport
/// and non-2xx failures unchanged (no retries).
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse>;

    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse>;
}

#[async_trait]
impl<B> AuthBackend for Arc<B>
where
    B: AuthBackend + ?Sized,
{
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        (**self).login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        (**self).register(registration).await
    }
}
