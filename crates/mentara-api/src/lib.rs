//! mentara-api
//!
//! HTTP surface of the pre-assessment engine: questionnaire catalogue,
//! checklist scoring and persistence, the conversational assessment, and
//! therapist applications.

pub mod accounts;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use mentara_agent::client::AssessmentAgent;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the application router.
pub fn router<A: AssessmentAgent + 'static>(state: AppState<A>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Protected routes
    let protected = Router::new()
        .route(
            "/pre-assessment",
            get(routes::pre_assessment::get_latest::<A>)
                .post(routes::pre_assessment::create::<A>),
        )
        .route("/pre-assessment/chatbot", post(routes::chatbot::start::<A>))
        .route(
            "/pre-assessment/chatbot/{id}",
            get(routes::chatbot::get_session::<A>).delete(routes::chatbot::reset::<A>),
        )
        .route(
            "/pre-assessment/chatbot/{id}/messages",
            post(routes::chatbot::send_message::<A>),
        )
        .route(
            "/pre-assessment/chatbot/{id}/answers",
            post(routes::chatbot::submit_answer::<A>),
        )
        .route(
            "/pre-assessment/chatbot/{id}/end",
            post(routes::chatbot::end::<A>),
        )
        .route(
            "/pre-assessment/chatbot/{id}/selection",
            get(routes::chatbot::selection::<A>),
        )
        .route(
            "/therapist/application",
            get(routes::therapist_applications::list::<A>)
                .post(routes::therapist_applications::submit::<A>),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.keys.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Health and catalogue (no auth)
        .route("/health", get(routes::health::health_check))
        .route(
            "/questionnaires",
            get(routes::questionnaires::list_questionnaires::<A>),
        )
        .route(
            "/questionnaires/{id}",
            get(routes::questionnaires::get_questionnaire::<A>),
        )
        .route(
            "/pre-assessment/questions",
            post(routes::pre_assessment::questions::<A>),
        )
        .route(
            "/pre-assessment/score",
            post(routes::pre_assessment::score::<A>),
        )
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
