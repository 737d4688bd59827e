// ============================================================================
// SESSION STATE - Snapshots de sesión para guardia de rutas y pantallas
// ============================================================================

use crate::models::Session;
use crate::state::reactivity::{ReactiveState, SubscriptionId};

/// Canal de publicación de la sesión. Solo `SessionManager` publica.
pub struct SessionState {
    inner: ReactiveState<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            inner: ReactiveState::new(Session::loading()),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }

    pub(crate) fn publish(&self, session: Session) {
        self.inner.set(session);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
