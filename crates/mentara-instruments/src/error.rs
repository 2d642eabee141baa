use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("invalid answers: {0}")]
    Validation(#[from] ValidationError),

    #[error("questionnaire '{0}' selected more than once")]
    DuplicateQuestionnaire(String),
}
