#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use mentara_agent::client::{AgentReply, AgentState, AssessmentAgent, EndReply, ToolCall};
use mentara_agent::error::AgentError;
use uuid::Uuid;

/// Replays canned replies in order and counts calls.
#[derive(Default)]
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<Result<AgentReply, AgentError>>>,
    pub chat_calls: AtomicUsize,
    pub end_calls: AtomicUsize,
    pub end_results: Option<serde_json::Value>,
}

impl ScriptedAgent {
    pub fn new(replies: Vec<Result<AgentReply, AgentError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn chats(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }
}

impl AssessmentAgent for ScriptedAgent {
    async fn chat(&self, _session_id: Uuid, _message: &str) -> Result<AgentReply, AgentError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Unavailable("script exhausted".to_string())))
    }

    async fn end_session(&self, _session_id: Uuid) -> Result<EndReply, AgentError> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        Ok(EndReply {
            results: self.end_results.clone(),
        })
    }
}

/// Never answers.
pub struct StalledAgent;

impl AssessmentAgent for StalledAgent {
    async fn chat(&self, _session_id: Uuid, _message: &str) -> Result<AgentReply, AgentError> {
        std::future::pending().await
    }

    async fn end_session(&self, _session_id: Uuid) -> Result<EndReply, AgentError> {
        std::future::pending().await
    }
}

pub fn reply(text: &str) -> Result<AgentReply, AgentError> {
    Ok(AgentReply {
        response: text.to_string(),
        ..AgentReply::default()
    })
}

pub fn final_reply(text: &str) -> Result<AgentReply, AgentError> {
    Ok(AgentReply {
        response: text.to_string(),
        state: Some(AgentState { is_complete: true }),
        results: Some(serde_json::json!({ "summary": "done" })),
        ..AgentReply::default()
    })
}

pub fn question(question_id: &str, options: usize) -> Result<AgentReply, AgentError> {
    Ok(AgentReply {
        response: "Over the last two weeks, how often have you felt down?".to_string(),
        tool_call: Some(ToolCall {
            question_id: question_id.to_string(),
            question: "Feeling down, depressed, or hopeless".to_string(),
            options: (0..options).map(|o| format!("option {o}")).collect(),
            topic: None,
        }),
        ..AgentReply::default()
    })
}
