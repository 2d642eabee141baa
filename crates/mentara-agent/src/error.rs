use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("agent returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("agent response parsing failed: {0}")]
    ResponseParse(String),

    #[error("agent unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a signed-in user is required to start a session")]
    Unauthenticated,

    #[error("session has already been started")]
    AlreadyStarted,

    #[error("session has not been started")]
    NotStarted,

    #[error("session is already complete")]
    Complete,

    #[error("a previous request for this session is still in flight")]
    Busy,

    #[error("resetting a session must be confirmed")]
    ResetNotConfirmed,

    #[error("session not found: {0}")]
    NotFound(Uuid),

    #[error("invalid question id: {0}")]
    InvalidQuestionId(String),

    #[error("question {question_id} is already answered")]
    AlreadyAnswered { question_id: String },

    #[error("invalid answer {answer} for question {question_id}")]
    InvalidAnswer { question_id: String, answer: i32 },

    #[error(transparent)]
    Agent(#[from] AgentError),
}
