use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// How the answers were collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AssessmentMethod {
    /// The shuffled questionnaire form.
    #[default]
    Checklist,
    /// The conversational assessment.
    Chatbot,
}

/// Free-text clinical context captured alongside the questionnaires.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ClinicalContext {
    pub past_therapy_experiences: Vec<String>,
    pub medication_history: Vec<String>,
    pub accessibility_needs: Vec<String>,
}

/// A completed pre-assessment as persisted for a client.
///
/// `scores` and `ai_estimate` are stored as opaque JSON; they are always
/// regenerated from the raw answers rather than edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreAssessment {
    pub id: Uuid,
    pub client_id: String,
    pub session_id: Option<Uuid>,
    pub method: AssessmentMethod,
    pub questionnaires: Vec<String>,
    /// Raw answers per questionnaire id, `-1` for unanswered items.
    pub answers: BTreeMap<String, Vec<i32>>,
    /// Answers in shuffled presentation order, when the form was used.
    #[serde(default)]
    pub flat_answers: Vec<i32>,
    pub seed: Option<String>,
    pub scores: serde_json::Value,
    pub severity_levels: BTreeMap<String, String>,
    pub ai_estimate: Option<serde_json::Value>,
    #[serde(default)]
    pub context: ClinicalContext,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
