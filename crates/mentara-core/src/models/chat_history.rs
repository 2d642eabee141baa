use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted conversational assessment.
///
/// Written to the object store after every exchange so the conversation
/// survives a restart of the API process.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatHistory {
    pub id: Uuid,
    pub user_id: String,
    pub messages: Vec<ChatHistoryMessage>,
    /// Structured answers grouped by questionnaire id, in arrival order.
    #[serde(default)]
    pub collected_answers: BTreeMap<String, Vec<i32>>,
    /// Structured answers keyed by the question id the agent asked.
    #[serde(default)]
    pub structured_answers: BTreeMap<String, i32>,
    pub is_complete: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
}

/// A single message in a persisted chat history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatHistoryMessage {
    pub role: ChatHistoryRole,
    pub content: String,
    #[serde(default)]
    pub kind: MessageKind,
    pub timestamp: jiff::Timestamp,
}

/// Role of a chat history message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatHistoryRole {
    User,
    Assistant,
}

/// Rendering hint for a message. Questionnaire messages carry a scored
/// question the client answers with one of the offered options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MessageKind {
    #[default]
    Text,
    Questionnaire,
}
