use std::collections::BTreeMap;

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use mentara_agent::client::AssessmentAgent;
use mentara_core::keys;
use mentara_core::models::assessment::{AssessmentMethod, ClinicalContext, PreAssessment};
use mentara_core::models::chat_history::ChatHistory;
use mentara_instruments::assembly::{FlatQuestion, assemble_questions, regroup_answers};
use mentara_instruments::scorer::{calculate_detailed_results, severity_levels};
use mentara_instruments::scoring::{ToolResult, UNANSWERED};
use mentara_instruments::{Questionnaire, Registry};
use mentara_storage::records::{load_records, save_record, try_load_record};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Answers as submitted: per questionnaire, or flat in the shuffled order
/// produced by `seed`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    #[serde(default)]
    pub questionnaires: Vec<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, Vec<i32>>,
    #[serde(default)]
    pub flat_answers: Vec<i32>,
    pub seed: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreAssessment {
    #[serde(flatten)]
    pub input: AnswerInput,
    #[serde(default)]
    pub method: AssessmentMethod,
    pub session_id: Option<Uuid>,
    /// Precomputed scores are stored as given; otherwise they are computed.
    pub scores: Option<Value>,
    pub severity_levels: Option<BTreeMap<String, String>>,
    pub ai_estimate: Option<Value>,
    #[serde(default)]
    pub context: ClinicalContext,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub questionnaires: Vec<String>,
    #[serde(default)]
    pub seed: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub scores: BTreeMap<String, ToolResult>,
    pub severity_levels: BTreeMap<String, String>,
}

/// Shuffled flat question list for the checklist form.
pub async fn questions<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<Vec<FlatQuestion>>, ApiError> {
    let ids = canonical_ids(&state.registry, &request.questionnaires)?;
    Ok(Json(assemble_questions(&state.registry, &ids, &request.seed)))
}

/// Score answers without persisting. Unknown questionnaire ids in
/// per-questionnaire answers score as "Unknown" instead of failing.
pub async fn score<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Json(input): Json<AnswerInput>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let answers = if input.answers.is_empty() {
        collect_answers(&state.registry, &input)?.1
    } else {
        for (id, raw) in &input.answers {
            if let Some(questionnaire) = state.registry.get(id) {
                validate(questionnaire, raw)?;
            }
        }
        input.answers
    };

    let scores = calculate_detailed_results(&state.registry, &answers);
    let severity_levels = severity_levels(&scores);
    Ok(Json(ScoreResponse {
        scores,
        severity_levels,
    }))
}

pub async fn create<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Json(mut request): Json<CreatePreAssessment>,
) -> Result<(StatusCode, Json<PreAssessment>), ApiError> {
    let input = &mut request.input;
    if input.answers.is_empty() && input.flat_answers.is_empty() {
        if let Some(session_id) = request.session_id {
            let history = chat_history(&state, session_id, &user.sub).await?;
            input.answers = history
                .collected_answers
                .into_iter()
                .filter(|(topic, _)| {
                    let known = state.registry.get(topic).is_some();
                    if !known {
                        tracing::warn!(%session_id, topic, "ignoring answers for unknown questionnaire");
                    }
                    known
                })
                .collect();
        }
    }

    let (questionnaires, answers) = collect_answers(&state.registry, &request.input)?;

    let computed = calculate_detailed_results(&state.registry, &answers);
    let scores = match request.scores {
        Some(scores) => scores,
        None => serde_json::to_value(&computed)?,
    };
    let severity_levels = request
        .severity_levels
        .unwrap_or_else(|| severity_levels(&computed));

    let now = jiff::Timestamp::now();
    let record = PreAssessment {
        id: Uuid::new_v4(),
        client_id: user.sub,
        session_id: request.session_id,
        method: request.method,
        questionnaires,
        answers,
        flat_answers: request.input.flat_answers,
        seed: request.input.seed,
        scores,
        severity_levels,
        ai_estimate: request.ai_estimate,
        context: request.context,
        created_at: now,
        updated_at: now,
    };

    save_record(&state.store, &keys::pre_assessment(record.id), &record).await?;
    tracing::info!(
        pre_assessment_id = %record.id,
        questionnaires = record.questionnaires.len(),
        "pre-assessment saved"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// The caller's most recent pre-assessment.
pub async fn get_latest<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PreAssessment>, ApiError> {
    let records: Vec<PreAssessment> =
        load_records(&state.store, keys::PRE_ASSESSMENTS_PREFIX).await?;

    records
        .into_iter()
        .filter(|r| r.client_id == user.sub)
        .max_by_key(|r| r.created_at)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no pre-assessment found".to_string()))
}

/// Resolve requested ids strictly to canonical registry ids.
fn canonical_ids(registry: &Registry, ids: &[String]) -> Result<Vec<String>, ApiError> {
    if ids.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one questionnaire is required".to_string(),
        ));
    }
    Ok(registry
        .resolve(ids)?
        .into_iter()
        .map(|q| q.id().to_string())
        .collect())
}

/// Turn submitted answers into validated per-questionnaire arrays, one
/// per selected questionnaire, padded with `-1`.
fn collect_answers(
    registry: &Registry,
    input: &AnswerInput,
) -> Result<(Vec<String>, BTreeMap<String, Vec<i32>>), ApiError> {
    let requested: Vec<String> = if input.questionnaires.is_empty() {
        input.answers.keys().cloned().collect()
    } else {
        input.questionnaires.clone()
    };
    let ids = canonical_ids(registry, &requested)?;

    let mut answers = BTreeMap::new();
    if !input.answers.is_empty() {
        for (id, raw) in &input.answers {
            let questionnaire = registry.require(id)?;
            if !ids.iter().any(|selected| selected == questionnaire.id()) {
                return Err(ApiError::BadRequest(format!(
                    "answers given for unselected questionnaire: {id}"
                )));
            }
            answers.insert(questionnaire.id().to_string(), raw.clone());
        }
    } else if !input.flat_answers.is_empty() {
        let seed = input.seed.as_deref().ok_or_else(|| {
            ApiError::BadRequest("seed is required with flatAnswers".to_string())
        })?;
        let expected = assemble_questions(registry, &ids, seed).len();
        if input.flat_answers.len() > expected {
            return Err(ApiError::BadRequest(format!(
                "{} flat answers given for {expected} questions",
                input.flat_answers.len()
            )));
        }
        answers = regroup_answers(registry, &ids, seed, &input.flat_answers);
    }

    for id in &ids {
        let questionnaire = registry.require(id)?;
        let raw = answers
            .entry(id.clone())
            .or_insert_with(|| vec![UNANSWERED; questionnaire.questions().len()]);
        validate(questionnaire, raw)?;
    }

    Ok((ids, answers))
}

fn validate(questionnaire: &dyn Questionnaire, answers: &[i32]) -> Result<(), ApiError> {
    Ok(questionnaire.check_answers(answers)?)
}

async fn chat_history<A>(
    state: &AppState<A>,
    session_id: Uuid,
    user_id: &str,
) -> Result<ChatHistory, ApiError> {
    let history: Option<ChatHistory> =
        try_load_record(&state.store, &keys::chat_session(session_id)).await?;
    history
        .filter(|h| h.user_id == user_id)
        .ok_or_else(|| ApiError::NotFound(format!("chat session not found: {session_id}")))
}
