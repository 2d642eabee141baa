mod common;

use axum::http::StatusCode;
use common::{FakeAgent, TestApp, final_reply};
use jiff::{SignedDuration, Timestamp};
use mentara_api::maintenance::purge_idle_sessions;
use mentara_core::keys;
use mentara_core::models::chat_history::ChatHistory;
use mentara_storage::records::try_load_record;
use serde_json::json;
use uuid::Uuid;

async fn start(app: &TestApp) -> Uuid {
    let (status, session) = app.post("/pre-assessment/chatbot", Some("client-1"), json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    session["sessionId"].as_str().unwrap().parse().unwrap()
}

async fn stored(app: &TestApp, id: Uuid) -> Option<ChatHistory> {
    try_load_record(&app.state.store, &keys::chat_session(id)).await.unwrap()
}

#[tokio::test]
async fn expired_sessions_lose_their_records() {
    let app = TestApp::new(FakeAgent::default());
    let id = start(&app).await;
    assert!(stored(&app, id).await.is_some());

    let report = purge_idle_sessions(&app.state, Timestamp::now()).await;
    assert!(report.expired.is_empty());

    let later = Timestamp::now() + SignedDuration::from_mins(31);
    let report = purge_idle_sessions(&app.state, later).await;
    assert_eq!(report.expired, vec![id]);
    assert!(stored(&app, id).await.is_none());
}

#[tokio::test]
async fn complete_sessions_stay_on_record() {
    let app = TestApp::new(FakeAgent::new(vec![final_reply("Done.")]));
    let id = start(&app).await;
    app.post(
        &format!("/pre-assessment/chatbot/{id}/messages"),
        Some("client-1"),
        json!({ "message": "that's all" }),
    )
    .await;

    let later = Timestamp::now() + SignedDuration::from_hours(1);
    let report = purge_idle_sessions(&app.state, later).await;
    assert_eq!(report.evicted, vec![id]);
    assert!(stored(&app, id).await.unwrap().is_complete);

    let (status, session) = app
        .get(&format!("/pre-assessment/chatbot/{id}"), Some("client-1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["status"], "complete");
}
