/**
 * Application State
 *
 * This module defines the state shared by every handler. `AppState` is
 * cloned into each request; all of its fields are reference-counted handles,
 * so cloning is cheap and every clone sees the same store and sessions.
 *
 * Handlers that need only one part of the state can extract it directly
 * (`State<Arc<dyn Store>>`, `State<SessionStore>`) thanks to the `FromRef`
 * implementations below.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::SessionStore;
use crate::backend::store::Store;
use crate::shared::AppConfig;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Users, photos and comments
    pub store: Arc<dyn Store>,

    /// Session tokens and flash messages
    pub sessions: SessionStore,

    /// bcrypt work factor for new accounts
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Build the state from a store and the application configuration
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        Self {
            store,
            sessions: SessionStore::from_config(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// State over a fresh in-memory store, with a fast bcrypt cost
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::backend::store::MemoryStore;

    let config = AppConfig::builder()
        .session_secret("test-secret")
        .bcrypt_cost(4)
        .build()
        .expect("valid test config");
    AppState::new(Arc::new(MemoryStore::new()), &config)
}
