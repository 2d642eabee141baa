mod common;

use axum::http::{Method, StatusCode};
use common::{FakeAgent, TestApp, send};
use serde_json::{Value, json};

#[tokio::test]
async fn saving_requires_a_valid_token() {
    let app = TestApp::new(FakeAgent::default());
    let body = json!({ "questionnaires": ["depression"] });

    let (status, response) = app.post("/pre-assessment", None, body.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "missing bearer token");

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/pre-assessment")
        .header("authorization", "Bearer not-a-jwt")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn per_questionnaire_answers_are_scored_and_saved() {
    let app = TestApp::new(FakeAgent::default());
    let (status, record) = app
        .post(
            "/pre-assessment",
            Some("client-1"),
            json!({
                "questionnaires": ["depression", "anxiety"],
                "answers": { "depression": [3, 3, 3, 3, 3, 3, 3, 0, 0] },
                "context": { "medicationHistory": ["sertraline"] }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["clientId"], "client-1");
    assert_eq!(record["method"], "CHECKLIST");
    assert_eq!(record["scores"]["depression"]["score"], 21);
    assert_eq!(record["severityLevels"]["depression"], "Severe");

    // Missing questionnaires are padded as unanswered.
    assert_eq!(record["answers"]["anxiety"], json!([-1, -1, -1, -1, -1, -1, -1]));
    assert_eq!(record["severityLevels"]["anxiety"], "Minimal");

    let (status, latest) = app.get("/pre-assessment", Some("client-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["id"], record["id"]);
    assert_eq!(latest["context"]["medicationHistory"], json!(["sertraline"]));

    let (status, _) = app.get("/pre-assessment", Some("client-2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn latest_record_wins() {
    let app = TestApp::new(FakeAgent::default());
    let body = |answer: i32| json!({ "answers": { "stress": vec![answer; 10] } });

    app.post("/pre-assessment", Some("client-1"), body(0)).await;
    let (_, second) = app.post("/pre-assessment", Some("client-1"), body(1)).await;

    let (_, latest) = app.get("/pre-assessment", Some("client-1")).await;
    assert_eq!(latest["id"], second["id"]);
}

#[tokio::test]
async fn flat_answers_are_regrouped_with_the_seed() {
    let app = TestApp::new(FakeAgent::default());
    let (_, questions) = app
        .post(
            "/pre-assessment/questions",
            None,
            json!({ "questionnaires": ["depression", "anxiety"], "seed": "client-1" }),
        )
        .await;

    // Answer 1 to every depression item and 2 to every anxiety item.
    let flat: Vec<i32> = questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| if q["questionnaireId"] == "depression" { 1 } else { 2 })
        .collect();

    let (status, record) = app
        .post(
            "/pre-assessment",
            Some("client-1"),
            json!({
                "questionnaires": ["depression", "anxiety"],
                "flatAnswers": flat,
                "seed": "client-1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["answers"]["depression"], json!(vec![1; 9]));
    assert_eq!(record["answers"]["anxiety"], json!(vec![2; 7]));
    assert_eq!(record["scores"]["anxiety"]["score"], 14);
}

#[tokio::test]
async fn invalid_submissions_are_rejected() {
    let app = TestApp::new(FakeAgent::default());
    let cases: Vec<Value> = vec![
        json!({}),
        json!({ "questionnaires": ["mystery"] }),
        json!({ "questionnaires": ["depression"], "flatAnswers": [1, 2] }),
        json!({ "questionnaires": ["depression"], "flatAnswers": vec![0; 10], "seed": "s" }),
        json!({ "questionnaires": ["depression"], "answers": { "anxiety": [1] } }),
        json!({ "answers": { "depression": [0, 0, 9] } }),
        json!({ "answers": { "depression": vec![0; 10] } }),
    ];

    for case in cases {
        let (status, body) = app.post("/pre-assessment", Some("client-1"), case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert!(body["error"].is_string(), "{case}");
    }
}

#[tokio::test]
async fn supplied_scores_are_kept() {
    let app = TestApp::new(FakeAgent::default());
    let (status, record) = app
        .post(
            "/pre-assessment",
            Some("client-1"),
            json!({
                "answers": { "depression": vec![0; 9] },
                "scores": { "depression": { "score": 99 } },
                "severityLevels": { "depression": "Reviewed" },
                "aiEstimate": { "depression": true }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["scores"]["depression"]["score"], 99);
    assert_eq!(record["severityLevels"]["depression"], "Reviewed");
    assert_eq!(record["aiEstimate"]["depression"], true);
}

#[tokio::test]
async fn chat_answers_become_a_record() {
    let app = TestApp::new(FakeAgent::default());
    let (_, session) = app.post("/pre-assessment/chatbot", Some("client-1"), json!({})).await;
    let id = session["sessionId"].as_str().unwrap().to_string();

    for (question_id, answer) in [("depression_q1", 2), ("depression_q2", 1)] {
        let (status, _) = app
            .post(
                &format!("/pre-assessment/chatbot/{id}/answers"),
                Some("client-1"),
                json!({ "questionId": question_id, "answer": answer }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, record) = app
        .post(
            "/pre-assessment",
            Some("client-1"),
            json!({ "method": "CHATBOT", "sessionId": id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["method"], "CHATBOT");
    assert_eq!(record["questionnaires"], json!(["depression"]));
    assert_eq!(
        record["answers"]["depression"],
        json!([2, 1, -1, -1, -1, -1, -1, -1, -1])
    );
    assert_eq!(record["scores"]["depression"]["score"], 3);

    // Another client cannot borrow the session.
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/pre-assessment",
        Some("client-2"),
        Some(json!({ "method": "CHATBOT", "sessionId": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
