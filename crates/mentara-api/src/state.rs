use std::sync::Arc;

use jiff::SignedDuration;
use mentara_agent::store::SessionStore;
use mentara_auth::jwt::TokenKeys;
use mentara_instruments::Registry;
use mentara_storage::objects::ObjectStore;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<A> {
    pub registry: Registry,
    pub store: ObjectStore,
    pub sessions: SessionStore,
    pub keys: TokenKeys,
    pub agent: Arc<A>,
    pub session_ttl: SignedDuration,
}

impl<A> AppState<A> {
    pub fn new(
        registry: Registry,
        store: ObjectStore,
        keys: TokenKeys,
        agent: A,
        session_ttl: SignedDuration,
    ) -> Self {
        Self {
            registry,
            store,
            sessions: SessionStore::new(),
            keys,
            agent: Arc::new(agent),
            session_ttl,
        }
    }
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            store: self.store.clone(),
            sessions: self.sessions.clone(),
            keys: self.keys.clone(),
            agent: Arc::clone(&self.agent),
            session_ttl: self.session_ttl,
        }
    }
}
