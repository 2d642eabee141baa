use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mentara_agent::error::SessionError;
use mentara_auth::error::AuthError;
use mentara_core::error::CoreError;
use mentara_instruments::error::InstrumentError;
use mentara_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    /// The AI service failed. Details are logged, not returned.
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Upstream(msg) => {
                tracing::error!("upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "the assessment service is unavailable".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            StorageError::InvalidKey { key } => ApiError::BadRequest(format!("invalid key: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Unauthenticated => ApiError::Unauthorized(e.to_string()),
            SessionError::NotFound(_) => ApiError::NotFound(e.to_string()),
            SessionError::ResetNotConfirmed
            | SessionError::InvalidQuestionId(_)
            | SessionError::InvalidAnswer { .. } => ApiError::BadRequest(e.to_string()),
            SessionError::AlreadyStarted
            | SessionError::NotStarted
            | SessionError::Complete
            | SessionError::Busy
            | SessionError::AlreadyAnswered { .. } => ApiError::Conflict(e.to_string()),
            SessionError::Agent(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}
