use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use mentara_agent::client::{AssessmentAgent, ToolCall};
use mentara_agent::error::SessionError;
use mentara_agent::session::ChatSession;
use mentara_core::keys;
use mentara_core::models::chat_history::ChatHistory;
use mentara_instruments::scorer::severity_levels;
use mentara_instruments::scoring::ToolResult;
use mentara_instruments::selection::Selection;
use mentara_storage::records::{save_record, try_load_record};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnswer {
    pub question_id: String,
    pub answer: i32,
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub response: String,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndResponse {
    pub results: Option<Value>,
    pub scores: BTreeMap<String, ToolResult>,
    pub severity_levels: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    #[serde(flatten)]
    pub selection: Selection,
    pub next_questionnaire: Option<String>,
}

pub async fn start<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<ChatSession>), ApiError> {
    let mut session = ChatSession::new();
    session.start(Some(user.sub.as_str()))?;
    persist(&state, &session).await?;

    let view = session.clone();
    state.sessions.insert(session).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;
    let session = handle.lock().await;
    Ok(Json(session.clone()))
}

/// Forward a client message to the agent.
///
/// The session lock is released while the agent call is outstanding; a
/// second message for the same session in that window gets `409`. The call
/// runs on its own task, so a client that disconnects mid-call cannot leave
/// the session in flight.
pub async fn send_message<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendMessage>,
) -> Result<Json<MessageResponse>, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;

    let pending = handle.lock().await.begin_send(&body.message)?;
    let Some(pending) = pending else {
        let session = handle.lock().await;
        return Ok(Json(MessageResponse {
            response: String::new(),
            is_complete: session.is_complete(),
            tool_call: None,
            results: None,
        }));
    };

    let task = tokio::spawn(async move {
        let outcome = state.agent.chat(pending.session_id, &pending.message).await;

        let mut session = handle.lock().await;
        let reply = session.finish_send(pending, outcome)?;
        persist(&state, &session).await?;

        Ok::<_, ApiError>(MessageResponse {
            response: reply.response,
            is_complete: session.is_complete(),
            tool_call: reply.tool_call,
            results: reply.results,
        })
    });
    joined(task).await.map(Json)
}

pub async fn submit_answer<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<StructuredAnswer>,
) -> Result<Json<ChatSession>, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;
    let mut session = handle.lock().await;
    session.submit_structured_answer(&state.registry, &body.question_id, body.answer)?;
    persist(&state, &session).await?;
    Ok(Json(session.clone()))
}

/// Finalize with the agent and score the structured answers.
pub async fn end<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<EndResponse>, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;

    let pending = handle.lock().await.begin_end()?;
    let task = tokio::spawn(async move {
        let outcome = state.agent.end_session(pending.session_id).await;

        let mut session = handle.lock().await;
        let results = session.finish_end(pending, outcome)?;
        persist(&state, &session).await?;

        let scores = session.scores(&state.registry);
        let severity_levels = severity_levels(&scores);
        Ok::<_, ApiError>(EndResponse {
            results,
            scores,
            severity_levels,
        })
    });
    joined(task).await.map(Json)
}

/// Discard a session. Requires `?confirm=true`.
pub async fn reset<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<ResetQuery>,
) -> Result<StatusCode, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;
    handle.lock().await.reset(query.confirm)?;

    state.sessions.remove(id).await;
    state.store.delete_object(&keys::chat_session(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn selection<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let handle = load_session(&state, id, &user.sub).await?;
    let session = handle.lock().await;
    Ok(Json(SelectionResponse {
        selection: session.selection(Vec::new()),
        next_questionnaire: session.next_questionnaire(),
    }))
}

/// The caller's session, from memory or restored from its persisted
/// history. Sessions belonging to other users are reported as missing.
async fn load_session<A>(
    state: &AppState<A>,
    id: Uuid,
    user_id: &str,
) -> Result<Arc<Mutex<ChatSession>>, ApiError> {
    let handle = match state.sessions.get(id).await {
        Some(handle) => handle,
        None => {
            let history: ChatHistory = try_load_record(&state.store, &keys::chat_session(id))
                .await?
                .ok_or(SessionError::NotFound(id))?;
            tracing::debug!(session_id = %id, "restoring chat session from storage");
            state
                .sessions
                .restore(ChatSession::from_history(history))
                .await?
        }
    };

    let owned = handle.lock().await.user_id() == Some(user_id);
    if !owned {
        return Err(SessionError::NotFound(id).into());
    }
    Ok(handle)
}

/// Await an agent round trip running on its own task.
async fn joined<T>(task: JoinHandle<Result<T, ApiError>>) -> Result<T, ApiError> {
    task.await
        .map_err(|e| ApiError::Internal(format!("agent task failed: {e}")))?
}

async fn persist<A>(state: &AppState<A>, session: &ChatSession) -> Result<(), ApiError> {
    let Some(history) = session.to_history() else {
        return Ok(());
    };
    save_record(&state.store, &keys::chat_session(history.id), &history).await?;
    Ok(())
}
