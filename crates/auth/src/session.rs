//! Session state machine.
//!
//! ```text
//!               login ok                      logout
//!  Anonymous ─────────────▶ Authenticated(u) ─────────▶ Anonymous
//!      ▲  │                    │       ▲
//!      │  └── logout ──┐       └───────┘ login ok (user replaced wholesale)
//!      └───────────────┘
//! ```
//!
//! The current state lives in a [`LatestBroadcast`], so queries read the
//! stored value and subscribers see every transition. Persisted state is
//! written before the in-memory state is published: once `login`/`logout`
//! returns, both copies agree.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockroom_core::{ClientError, ClientResult};

use crate::{
    AuthBackend, AuthResponse, Credentials, LatestBroadcast, PersistedSessionStore, Registration,
    Subscription, User,
};

/// Client-side session: at most one authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

impl From<Option<User>> for Session {
    fn from(value: Option<User>) -> Self {
        value.map_or(Session::Anonymous, Session::Authenticated)
    }
}

/// Owns the session state, its persisted copy and its observers.
///
/// Construct one per application and share it through `Arc`.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    store: PersistedSessionStore,
    state: LatestBroadcast<Session>,
    /// Bumped by every issued login and every completed logout. A login only
    /// applies its result if the counter still holds the value it issued.
    generation: Mutex<u64>,
}

impl SessionManager {
    /// Build the manager, seeding state from the persisted store.
    ///
    /// Absent or unreadable persisted data starts the session as
    /// [`Session::Anonymous`]; storage is left untouched.
    pub fn new(backend: Arc<dyn AuthBackend>, store: PersistedSessionStore) -> Self {
        let initial = match store.load() {
            Ok(user) => Session::from(user),
            Err(err) => {
                tracing::debug!(key = store.key(), error = %err, "ignoring unreadable persisted session");
                Session::Anonymous
            }
        };

        Self {
            backend,
            store,
            state: LatestBroadcast::new(initial),
            generation: Mutex::new(0),
        }
    }

    /// Authenticate against the backend and establish a session.
    ///
    /// The login is sequenced when this method is called, not when the
    /// returned future first runs: if another `login` or a `logout` is issued
    /// before the response arrives, this one resolves to
    /// [`ClientError::Superseded`] and leaves the session untouched.
    ///
    /// Any error (transport, non-2xx, response without a user, storage)
    /// leaves the current session as it was.
    pub fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = ClientResult<AuthResponse>> + Send + '_ {
        let ticket = self.issue();
        let credentials = Credentials::new(email, password);

        async move {
            let response = self.backend.login(&credentials).await?;
            let user = response
                .user
                .clone()
                .ok_or_else(|| ClientError::decode("login response did not include a user"))?;

            let generation = self.lock_generation();
            if *generation != ticket {
                tracing::debug!(ticket, current = *generation, "discarding superseded login");
                return Err(ClientError::Superseded);
            }

            self.store.save(&user)?;
            tracing::debug!(user_id = %user.id, admin = user.is_admin(), "session established");
            self.state.publish(Session::Authenticated(user));

            Ok(response)
        }
    }

    /// Register a new account.
    ///
    /// Registration does not log the user in: the session and the persisted
    /// store are never touched. Call [`SessionManager::login`] afterwards.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let registration = Registration::new(name, email, password);
        self.backend.register(&registration).await
    }

    /// Clear the persisted session and become anonymous.
    ///
    /// Idempotent; observers are notified even when already anonymous. If the
    /// store cannot be cleared the in-memory session is kept and the storage
    /// error is returned.
    pub fn logout(&self) -> ClientResult<()> {
        let mut generation = self.lock_generation();

        self.store.clear()?;
        *generation += 1;
        tracing::debug!("session cleared");
        self.state.publish(Session::Anonymous);

        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with_latest(Session::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.state.with_latest(Session::is_admin)
    }

    pub fn session(&self) -> Session {
        self.state.latest()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with_latest(|s| s.user().cloned())
    }

    /// Subscribe to session transitions (current value first).
    pub fn subscribe(&self) -> Subscription<Session> {
        self.state.subscribe()
    }

    fn issue(&self) -> u64 {
        let mut generation = self.lock_generation();
        *generation += 1;
        *generation
    }

    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("session", &self.state.latest())
            .finish_non_exhaustive()
    }
}
