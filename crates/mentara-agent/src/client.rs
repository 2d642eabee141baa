//! Client for the external AI assessment service.
//!
//! The service owns the conversation model; this side only forwards the
//! client's messages and reads back the reply, an optional structured
//! question to render, and completion state. Session ids are minted here
//! and passed through; the service keys its own state by them.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::AgentError;

pub const DEFAULT_AGENT_URL: &str = "http://localhost:5001";

/// A conversational assessment backend.
pub trait AssessmentAgent: Send + Sync {
    /// Forward one client message and return the agent's reply.
    fn chat(
        &self,
        session_id: Uuid,
        message: &str,
    ) -> impl Future<Output = Result<AgentReply, AgentError>> + Send;

    /// Ask the agent to finalize the session and return any results.
    fn end_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<EndReply, AgentError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    session_id: Uuid,
    message: &'a str,
}

/// Reply to a chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AgentReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<AgentState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tool_call: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub results: Option<serde_json::Value>,
}

impl AgentReply {
    pub fn is_complete(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_complete)
    }
}

/// Conversation state reported by the agent. Snake case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgentState {
    #[serde(default)]
    pub is_complete: bool,
}

/// A scored questionnaire item the agent wants answered with one of
/// `options`. `question_id` has the form `<questionnaire>_q<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToolCall {
    pub question_id: String,
    pub question: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub topic: Option<String>,
}

/// Reply to a finalize request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EndReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub results: Option<serde_json::Value>,
}

/// [`AssessmentAgent`] over the service's JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpAgent {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgent {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, AgentError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "agent request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AgentError::ResponseParse(e.to_string()))
    }
}

impl AssessmentAgent for HttpAgent {
    async fn chat(&self, session_id: Uuid, message: &str) -> Result<AgentReply, AgentError> {
        self.post("/api/chat", &ChatRequest { session_id, message })
            .await
    }

    async fn end_session(&self, session_id: Uuid) -> Result<EndReply, AgentError> {
        self.post(
            &format!("/api/session/{session_id}/end"),
            &serde_json::json!({}),
        )
        .await
    }
}
