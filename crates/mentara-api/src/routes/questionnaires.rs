use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use mentara_agent::client::AssessmentAgent;
use mentara_instruments::QuestionnaireSummary;
use mentara_instruments::scoring::ScoringGranularity;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireListing {
    id: String,
    title: String,
    short_name: String,
    question_count: usize,
    granularity: ScoringGranularity,
}

pub async fn list_questionnaires<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
) -> Json<Vec<QuestionnaireListing>> {
    let listings = state
        .registry
        .iter()
        .map(|q| QuestionnaireListing {
            id: q.id().to_string(),
            title: q.title().to_string(),
            short_name: q.short_name().to_string(),
            question_count: q.questions().len(),
            granularity: q.granularity(),
        })
        .collect();
    Json(listings)
}

pub async fn get_questionnaire<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<Json<QuestionnaireSummary>, ApiError> {
    let questionnaire = state
        .registry
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("questionnaire not found: {id}")))?;
    Ok(Json(questionnaire.summary()))
}
