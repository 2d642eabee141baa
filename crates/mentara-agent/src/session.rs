//! The chat-driven assessment session.
//!
//! A session moves `Uninitialized → Active → Complete`. Sending is split
//! into [`ChatSession::begin_send`] and [`ChatSession::finish_send`] so a
//! caller holding the session behind a lock can release it across the
//! network call; the in-flight flag rejects a second send in between.
//! A failed call leaves the session exactly as it was before the send, and
//! so does a send whose future is dropped before the agent answers.

use std::collections::BTreeMap;

use mentara_core::models::chat_history::{
    ChatHistory, ChatHistoryMessage, ChatHistoryRole, MessageKind,
};
use mentara_instruments::Registry;
use mentara_instruments::scorer::calculate_detailed_results;
use mentara_instruments::scoring::{ToolResult, UNANSWERED};
use mentara_instruments::selection::{Selection, Suggestion, select_questionnaires};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::client::{AgentReply, AssessmentAgent, EndReply, ToolCall};
use crate::error::{AgentError, SessionError};

pub const GREETING: &str = "Hi, I'm here to help you get ready for your first session. \
There are no right or wrong answers. How have you been feeling lately?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Active,
    Complete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatSession {
    status: SessionStatus,
    session_id: Option<Uuid>,
    user_id: Option<String>,
    messages: Vec<ChatHistoryMessage>,
    /// The structured question last asked by the agent, if unanswered.
    pending_question: Option<ToolCall>,
    /// Answers per questionnaire id, in arrival order.
    collected_answers: BTreeMap<String, Vec<i32>>,
    structured_answers: BTreeMap<String, i32>,
    results: Option<serde_json::Value>,
    created_at: Option<jiff::Timestamp>,
    updated_at: Option<jiff::Timestamp>,
    completed_at: Option<jiff::Timestamp>,
    #[serde(skip)]
    #[ts(skip)]
    in_flight: bool,
}

/// A send accepted by [`ChatSession::begin_send`], to be completed with the
/// agent's outcome.
#[derive(Debug)]
#[must_use]
pub struct PendingSend {
    pub session_id: Uuid,
    pub message: String,
    checkpoint: Checkpoint,
}

/// A finalize accepted by [`ChatSession::begin_end`].
#[derive(Debug)]
#[must_use]
pub struct PendingEnd {
    pub session_id: Uuid,
}

#[derive(Debug)]
struct Checkpoint {
    messages: usize,
    updated_at: Option<jiff::Timestamp>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user_id` with a freshly minted id and the
    /// greeting as the first message.
    pub fn start(&mut self, user_id: Option<&str>) -> Result<Uuid, SessionError> {
        let user_id = user_id
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(SessionError::Unauthenticated)?;
        if self.status != SessionStatus::Uninitialized {
            return Err(SessionError::AlreadyStarted);
        }

        let id = Uuid::new_v4();
        let now = jiff::Timestamp::now();
        *self = Self {
            status: SessionStatus::Active,
            session_id: Some(id),
            user_id: Some(user_id.to_string()),
            messages: vec![message(ChatHistoryRole::Assistant, GREETING, MessageKind::Text, now)],
            created_at: Some(now),
            updated_at: Some(now),
            ..Self::default()
        };

        tracing::info!(session_id = %id, user_id, "chat session started");
        Ok(id)
    }

    /// Accept a client message for sending.
    ///
    /// Blank text is a no-op and returns `None`. Otherwise the message is
    /// appended and the session is marked in flight until
    /// [`finish_send`](Self::finish_send).
    pub fn begin_send(&mut self, text: &str) -> Result<Option<PendingSend>, SessionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let session_id = self.ready()?;

        let checkpoint = Checkpoint {
            messages: self.messages.len(),
            updated_at: self.updated_at,
        };
        let now = jiff::Timestamp::now();
        self.messages
            .push(message(ChatHistoryRole::User, text, MessageKind::Text, now));
        self.updated_at = Some(now);
        self.in_flight = true;

        Ok(Some(PendingSend {
            session_id,
            message: text.to_string(),
            checkpoint,
        }))
    }

    /// Apply the agent's outcome for a send started with
    /// [`begin_send`](Self::begin_send).
    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        outcome: Result<AgentReply, AgentError>,
    ) -> Result<AgentReply, SessionError> {
        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id = %pending.session_id, error = %e, "agent chat failed");
                self.rollback(pending);
                return Err(e.into());
            }
        };
        self.in_flight = false;

        let now = jiff::Timestamp::now();
        let kind = if reply.tool_call.is_some() {
            MessageKind::Questionnaire
        } else {
            MessageKind::Text
        };
        self.messages
            .push(message(ChatHistoryRole::Assistant, &reply.response, kind, now));
        self.updated_at = Some(now);
        if reply.tool_call.is_some() {
            self.pending_question = reply.tool_call.clone();
        }
        if reply.results.is_some() {
            self.results = reply.results.clone();
        }
        if reply.is_complete() {
            self.complete(now);
        }

        Ok(reply)
    }

    /// Send one message through `agent`. Returns `None` for blank text.
    pub async fn send_message<A: AssessmentAgent>(
        &mut self,
        agent: &A,
        text: &str,
    ) -> Result<Option<AgentReply>, SessionError> {
        let Some(pending) = self.begin_send(text)? else {
            return Ok(None);
        };
        let (session_id, message) = (pending.session_id, pending.message.clone());

        let mut guard = SendGuard {
            session: self,
            pending: Some(pending),
        };
        let outcome = agent.chat(session_id, &message).await;
        match guard.pending.take() {
            Some(pending) => guard.session.finish_send(pending, outcome).map(Some),
            None => Err(SessionError::NotStarted),
        }
    }

    /// Undo a send that will never be finished, e.g. because the request
    /// carrying it was cancelled.
    pub fn abort_send(&mut self, pending: PendingSend) {
        tracing::warn!(session_id = %pending.session_id, "chat send abandoned");
        self.rollback(pending);
    }

    /// Accept a finalize request. Ending a complete session is allowed and
    /// refreshes its results.
    pub fn begin_end(&mut self) -> Result<PendingEnd, SessionError> {
        let session_id = self.session_id.ok_or(SessionError::NotStarted)?;
        if self.in_flight {
            return Err(SessionError::Busy);
        }
        self.in_flight = true;
        Ok(PendingEnd { session_id })
    }

    /// Release a finalize that will never be finished.
    pub fn abort_end(&mut self, pending: PendingEnd) {
        tracing::warn!(session_id = %pending.session_id, "chat finalize abandoned");
        self.in_flight = false;
    }

    pub fn finish_end(
        &mut self,
        pending: PendingEnd,
        outcome: Result<EndReply, AgentError>,
    ) -> Result<Option<serde_json::Value>, SessionError> {
        self.in_flight = false;

        let reply = outcome.map_err(|e| {
            tracing::error!(session_id = %pending.session_id, error = %e, "agent finalize failed");
            SessionError::from(e)
        })?;

        if reply.results.is_some() {
            self.results = reply.results;
        }
        let now = jiff::Timestamp::now();
        self.updated_at = Some(now);
        if self.status != SessionStatus::Complete {
            self.complete(now);
        }
        tracing::info!(session_id = %pending.session_id, "chat session ended");
        Ok(self.results.clone())
    }

    /// Finalize through `agent` and force the session complete.
    pub async fn end_session<A: AssessmentAgent>(
        &mut self,
        agent: &A,
    ) -> Result<Option<serde_json::Value>, SessionError> {
        let pending = self.begin_end()?;
        let session_id = pending.session_id;

        let mut guard = EndGuard {
            session: self,
            pending: Some(pending),
        };
        let outcome = agent.end_session(session_id).await;
        match guard.pending.take() {
            Some(pending) => guard.session.finish_end(pending, outcome),
            None => Err(SessionError::NotStarted),
        }
    }

    /// Discard everything and return to `Uninitialized`.
    pub fn reset(&mut self, confirmed: bool) -> Result<(), SessionError> {
        if !confirmed {
            return Err(SessionError::ResetNotConfirmed);
        }
        if self.in_flight {
            return Err(SessionError::Busy);
        }
        if let Some(id) = self.session_id {
            tracing::info!(session_id = %id, "chat session reset");
        }
        *self = Self::default();
        Ok(())
    }

    /// Record the answer to a structured question.
    ///
    /// `question_id` is `<questionnaire>_q<n>` with `n` counting from 1; the
    /// questionnaire must be in `registry` and have an `n`th question, and
    /// the answer must be one of that question's options. Answers are stored
    /// at their question's position, unanswered slots holding `-1`.
    pub fn submit_structured_answer(
        &mut self,
        registry: &Registry,
        question_id: &str,
        answer: i32,
    ) -> Result<(), SessionError> {
        self.ready()?;

        let invalid_id = || SessionError::InvalidQuestionId(question_id.to_string());
        let (topic, number) = question_id.rsplit_once("_q").ok_or_else(invalid_id)?;
        let questionnaire = registry.get(topic).ok_or_else(invalid_id)?;
        let index = number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(invalid_id)?;
        let question = questionnaire.questions().get(index).ok_or_else(invalid_id)?;

        let key = format!("{}_q{}", questionnaire.id(), index + 1);
        if self.structured_answers.contains_key(&key) {
            return Err(SessionError::AlreadyAnswered { question_id: key });
        }

        let pending = self
            .pending_question
            .as_ref()
            .filter(|q| q.question_id == question_id || q.question_id == key);
        let offered = pending.is_none_or(|q| q.options.is_empty() || (answer as usize) < q.options.len());
        if !(0..=question.max_option()).contains(&answer) || !offered {
            return Err(SessionError::InvalidAnswer {
                question_id: question_id.to_string(),
                answer,
            });
        }
        if pending.is_some() {
            self.pending_question = None;
        }

        let len = questionnaire.questions().len();
        let slots = self
            .collected_answers
            .entry(questionnaire.id().to_string())
            .or_default();
        if slots.len() < len {
            slots.resize(len, UNANSWERED);
        }
        if let Some(slot) = slots.get_mut(index) {
            *slot = answer;
        }
        self.structured_answers.insert(key, answer);
        self.updated_at = Some(jiff::Timestamp::now());

        tracing::debug!(question_id, answer, "structured answer recorded");
        Ok(())
    }

    /// Score the structured answers collected so far.
    pub fn scores(&self, registry: &Registry) -> BTreeMap<String, ToolResult> {
        calculate_detailed_results(registry, &self.collected_answers)
    }

    /// Suggest questionnaires from what the client has said.
    pub fn selection(&self, external: Vec<Suggestion>) -> Selection {
        let user_messages: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == ChatHistoryRole::User)
            .map(|m| m.content.as_str())
            .collect();
        select_questionnaires(&user_messages, external)
    }

    /// The first suggested questionnaire with no answers yet.
    pub fn next_questionnaire(&self) -> Option<String> {
        let answered: Vec<&str> = self.collected_answers.keys().map(String::as_str).collect();
        self.selection(Vec::new())
            .next_questionnaire(&answered)
            .map(str::to_string)
    }

    /// The persisted form. `None` until the session has started.
    pub fn to_history(&self) -> Option<ChatHistory> {
        let (id, user_id, created_at) = match (&self.session_id, &self.user_id, self.created_at) {
            (Some(id), Some(user_id), Some(created_at)) => (*id, user_id.clone(), created_at),
            _ => return None,
        };
        Some(ChatHistory {
            id,
            user_id,
            messages: self.messages.clone(),
            collected_answers: self.collected_answers.clone(),
            structured_answers: self.structured_answers.clone(),
            is_complete: self.status == SessionStatus::Complete,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
            completed_at: self.completed_at,
        })
    }

    /// Rebuild a session from its persisted form.
    pub fn from_history(history: ChatHistory) -> Self {
        Self {
            status: if history.is_complete {
                SessionStatus::Complete
            } else {
                SessionStatus::Active
            },
            session_id: Some(history.id),
            user_id: Some(history.user_id),
            messages: history.messages,
            pending_question: None,
            collected_answers: history.collected_answers,
            structured_answers: history.structured_answers,
            results: None,
            created_at: Some(history.created_at),
            updated_at: Some(history.updated_at),
            completed_at: history.completed_at,
            in_flight: false,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatHistoryMessage] {
        &self.messages
    }

    pub fn pending_question(&self) -> Option<&ToolCall> {
        self.pending_question.as_ref()
    }

    pub fn collected_answers(&self) -> &BTreeMap<String, Vec<i32>> {
        &self.collected_answers
    }

    pub fn structured_answers(&self) -> &BTreeMap<String, i32> {
        &self.structured_answers
    }

    pub fn results(&self) -> Option<&serde_json::Value> {
        self.results.as_ref()
    }

    pub fn updated_at(&self) -> Option<jiff::Timestamp> {
        self.updated_at
    }

    fn ready(&self) -> Result<Uuid, SessionError> {
        match (self.status, self.session_id) {
            (SessionStatus::Active, Some(id)) if self.in_flight => {
                tracing::debug!(session_id = %id, "rejecting send while in flight");
                Err(SessionError::Busy)
            }
            (SessionStatus::Active, Some(id)) => Ok(id),
            (SessionStatus::Complete, _) => Err(SessionError::Complete),
            _ => Err(SessionError::NotStarted),
        }
    }

    fn rollback(&mut self, pending: PendingSend) {
        self.in_flight = false;
        self.messages.truncate(pending.checkpoint.messages);
        self.updated_at = pending.checkpoint.updated_at;
    }

    fn complete(&mut self, now: jiff::Timestamp) {
        self.status = SessionStatus::Complete;
        self.completed_at = Some(now);
        if let Some(id) = self.session_id {
            tracing::info!(session_id = %id, "chat session complete");
        }
    }
}

/// Rolls a send back if dropped before it is finished.
struct SendGuard<'a> {
    session: &'a mut ChatSession,
    pending: Option<PendingSend>,
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.session.abort_send(pending);
        }
    }
}

/// Releases a finalize if dropped before it is finished.
struct EndGuard<'a> {
    session: &'a mut ChatSession,
    pending: Option<PendingEnd>,
}

impl Drop for EndGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.session.abort_end(pending);
        }
    }
}

fn message(
    role: ChatHistoryRole,
    content: &str,
    kind: MessageKind,
    timestamp: jiff::Timestamp,
) -> ChatHistoryMessage {
    ChatHistoryMessage {
        role,
        content: content.to_string(),
        kind,
        timestamp,
    }
}
