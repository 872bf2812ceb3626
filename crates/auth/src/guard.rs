//! Access guard for admin-only views.

use std::sync::{Arc, Mutex, PoisonError};

use crate::SessionManager;

/// Route the guard redirects to when access is denied.
pub const LOGIN_ROUTE: &str = "/login";

/// Navigation facility invoked by the guard on denial.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

impl<N> Navigator for Arc<N>
where
    N: Navigator + ?Sized,
{
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }
}

/// Gates entry to admin-only views.
///
/// Re-evaluated on every call; nothing is cached.
#[derive(Debug)]
pub struct AdminGuard<N> {
    session: Arc<SessionManager>,
    navigator: N,
}

impl<N: Navigator> AdminGuard<N> {
    pub fn new(session: Arc<SessionManager>, navigator: N) -> Self {
        Self { session, navigator }
    }

    /// `true` iff the current session belongs to an admin. Otherwise
    /// navigates to [`LOGIN_ROUTE`] once and returns `false`.
    pub fn can_activate(&self) -> bool {
        if self.session.is_admin() {
            return true;
        }

        self.navigator.navigate(LOGIN_ROUTE);
        false
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

/// Navigator that records requested routes (tests/dev).
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_string());
    }
}
