use std::collections::HashMap;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::ChatSession;

/// Live chat sessions, one lock per session.
///
/// Cloning is cheap; clones share the same sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<ChatSession>>>>>,
}

/// Outcome of [`SessionStore::purge_expired`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Incomplete sessions dropped for inactivity.
    pub expired: Vec<Uuid>,
    /// Complete sessions evicted from memory. Their records persist.
    pub evicted: Vec<Uuid>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a started session, returning its shared handle.
    pub async fn insert(&self, session: ChatSession) -> Result<Arc<Mutex<ChatSession>>, SessionError> {
        let id = session.session_id().ok_or(SessionError::NotStarted)?;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    /// Track a session restored from storage. If another request restored
    /// it first, that handle wins and is returned.
    pub async fn restore(&self, session: ChatSession) -> Result<Arc<Mutex<ChatSession>>, SessionError> {
        let id = session.session_id().ok_or(SessionError::NotStarted)?;
        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(session)));
        Ok(Arc::clone(handle))
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than `ttl` as of `now`.
    ///
    /// Sessions that are locked or have a request in flight are in use and
    /// are kept.
    pub async fn purge_expired(&self, ttl: SignedDuration, now: Timestamp) -> PurgeReport {
        let mut report = PurgeReport::default();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|id, handle| {
            let Ok(session) = handle.try_lock() else {
                return true;
            };
            if session.is_in_flight() {
                return true;
            }
            let idle = session
                .updated_at()
                .map(|at| now.duration_since(at))
                .unwrap_or(SignedDuration::ZERO);
            if idle <= ttl {
                return true;
            }
            if session.is_complete() {
                report.evicted.push(*id);
            } else {
                report.expired.push(*id);
            }
            false
        });

        if !report.expired.is_empty() || !report.evicted.is_empty() {
            tracing::info!(
                expired = report.expired.len(),
                evicted = report.evicted.len(),
                remaining = sessions.len(),
                "purged idle chat sessions"
            );
        }
        report
    }
}
