//! Application wiring: one explicitly constructed session shared by every
//! consumer.

use std::sync::Arc;

use stockroom_auth::{AdminGuard, Navigator, PersistedSessionStore, SessionManager};
use stockroom_core::ClientResult;

use crate::{ApiClient, ClientConfig, FileKeyValueStore, HttpAuthBackend, RemoteItemClient};

/// Navigator for headless callers: denial is logged, nothing else happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(route, "navigation requested");
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<SessionManager>,
    pub items: RemoteItemClient,
}

impl AppState {
    /// Wire the HTTP backend and the file-backed session store from `config`.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(config.api_url.clone())?;
        let kv = Arc::new(FileKeyValueStore::new(config.data_dir.clone()));
        let store = PersistedSessionStore::with_key(kv, config.session_key.clone());

        Ok(Self::with_parts(config, api, store))
    }

    /// Wire the HTTP backend with a caller-provided session store.
    pub fn with_parts(config: ClientConfig, api: ApiClient, store: PersistedSessionStore) -> Self {
        let backend = Arc::new(HttpAuthBackend::new(api.clone()));
        let session = Arc::new(SessionManager::new(backend, store));
        tracing::debug!(api_url = %config.api_url, logged_in = session.is_logged_in(), "client initialised");

        Self {
            config,
            session,
            items: RemoteItemClient::new(api),
        }
    }

    pub fn admin_guard<N: Navigator>(&self, navigator: N) -> AdminGuard<N> {
        AdminGuard::new(self.session.clone(), navigator)
    }
}
