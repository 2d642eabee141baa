#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use jiff::SignedDuration;
use mentara_agent::client::{AgentReply, AgentState, AssessmentAgent, EndReply, ToolCall};
use mentara_agent::error::AgentError;
use mentara_api::state::AppState;
use mentara_auth::jwt::{Claims, TokenKeys};
use mentara_instruments::Registry;
use mentara_storage::objects::ObjectStore;
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &[u8] = b"test-signing-secret";

/// Holds a chat call open until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Replays canned replies in order.
#[derive(Default)]
pub struct FakeAgent {
    replies: Mutex<VecDeque<Result<AgentReply, AgentError>>>,
    chat_calls: AtomicUsize,
    pub gate: Option<Gate>,
}

impl FakeAgent {
    pub fn new(replies: Vec<Result<AgentReply, AgentError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn gated(replies: Vec<Result<AgentReply, AgentError>>) -> Self {
        Self {
            gate: Some(Gate::default()),
            ..Self::new(replies)
        }
    }

    pub fn chats(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }
}

impl AssessmentAgent for FakeAgent {
    async fn chat(&self, _session_id: Uuid, _message: &str) -> Result<AgentReply, AgentError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(AgentError::Unavailable("script exhausted".to_string())))
    }

    async fn end_session(&self, _session_id: Uuid) -> Result<EndReply, AgentError> {
        Ok(EndReply {
            results: Some(serde_json::json!({ "summary": "finalized" })),
        })
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
        ..AgentReply::default()
    })
}

pub fn question(question_id: &str) -> Result<AgentReply, AgentError> {
    Ok(AgentReply {
        response: "How often have you felt down?".to_string(),
        tool_call: Some(ToolCall {
            question_id: question_id.to_string(),
            question: "Feeling down, depressed, or hopeless".to_string(),
            options: vec![
                "Not at all".to_string(),
                "Several days".to_string(),
                "More than half the days".to_string(),
                "Nearly every day".to_string(),
            ],
            topic: None,
        }),
        ..AgentReply::default()
    })
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState<FakeAgent>,
}

impl TestApp {
    pub fn new(agent: FakeAgent) -> Self {
        let state = AppState::new(
            Registry::standard(),
            ObjectStore::in_memory(),
            TokenKeys::from_secret(SECRET),
            agent,
            SignedDuration::from_mins(30),
        );
        Self {
            router: mentara_api::router(state.clone()),
            state,
        }
    }

    pub fn agent(&self) -> &FakeAgent {
        &self.state.agent
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, user, None).await
    }

    pub async fn post(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, user, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri, user, None).await
    }
}

pub fn token(user: &str) -> String {
    let now = jiff::Timestamp::now().as_second() as u64;
    TokenKeys::from_secret(SECRET)
        .sign(&Claims {
            sub: user.to_string(),
            exp: now + 3600,
            iat: now,
            email: None,
        })
        .unwrap()
}

/// Send a request as `user` (signed with the test secret) and decode the
/// JSON body, `Null` when empty.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token(user)));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
