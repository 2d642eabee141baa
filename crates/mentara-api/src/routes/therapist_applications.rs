use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use mentara_agent::client::AssessmentAgent;
use mentara_core::keys;
use mentara_core::models::therapist_application::{ApplicationStatus, TherapistApplication};
use mentara_storage::records::{load_records, save_record};

use crate::accounts;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationPage {
    pub applications: Vec<TherapistApplication>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

pub async fn submit<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<TherapistApplication>), ApiError> {
    let application =
        TherapistApplication::from_submission(Uuid::new_v4(), &user.sub, &form, jiff::Timestamp::now())?;

    save_record(
        &state.store,
        &keys::therapist_application(application.id),
        &application,
    )
    .await?;
    tracing::info!(
        application_id = %application.id,
        applicant = %application.full_name(),
        "therapist application submitted"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// Admin listing, newest first.
pub async fn list<A: AssessmentAgent + 'static>(
    State(state): State<AppState<A>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApplicationPage>, ApiError> {
    if !accounts::is_admin(&state.store, &user.sub).await? {
        return Err(ApiError::Forbidden("admin role required".to_string()));
    }

    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(value) => Some(
            ApplicationStatus::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown status: {value}")))?,
        ),
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let mut applications: Vec<TherapistApplication> =
        load_records(&state.store, keys::THERAPIST_APPLICATIONS_PREFIX).await?;
    applications.retain(|a| status.is_none_or(|s| a.status == s));
    applications.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

    let total = applications.len();
    let applications = applications.into_iter().skip(offset).take(limit).collect();

    Ok(Json(ApplicationPage {
        applications,
        total,
        limit,
        offset,
    }))
}
