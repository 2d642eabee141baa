use std::time::Duration;

use jiff::Timestamp;
use mentara_agent::client::AssessmentAgent;
use mentara_agent::store::PurgeReport;
use mentara_core::keys;

use crate::state::AppState;

pub const PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Drop idle chat sessions as of `now`. Expired (incomplete) sessions lose
/// their persisted history too; complete ones only leave memory.
pub async fn purge_idle_sessions<A>(state: &AppState<A>, now: Timestamp) -> PurgeReport {
    let report = state.sessions.purge_expired(state.session_ttl, now).await;
    for id in &report.expired {
        if let Err(e) = state.store.delete_object(&keys::chat_session(*id)).await {
            tracing::error!(session_id = %id, error = %e, "failed to delete expired chat session");
        }
    }
    report
}

/// Run [`purge_idle_sessions`] every [`PURGE_INTERVAL`] until the process
/// exits.
pub async fn run_session_purger<A: AssessmentAgent + 'static>(state: AppState<A>) {
    let mut ticker = tokio::time::interval(PURGE_INTERVAL);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        purge_idle_sessions(&state, Timestamp::now()).await;
    }
}
