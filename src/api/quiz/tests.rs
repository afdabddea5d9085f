use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

fn quiz_payload() -> serde_json::Value {
    json!({
        "questions": [
            {
                "question": "Capital of France?",
                "options": ["Paris", "London", "Rome", "Berlin"],
                "answer": "Paris"
            },
            {
                "question": "2 + 2?",
                "options": ["3", "4", "5", "6"],
                "answer": "4"
            }
        ],
        "duration": 1
    })
}

#[tokio::test]
async fn teacher_can_save_quiz_and_students_can_fetch_it() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/save",
            Some("teacher"),
            Some(quiz_payload()),
        ))
        .await
        .expect("save quiz");

    let status = response.status();
    let saved = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {saved}");
    assert_eq!(saved["status"], "success");
    assert_eq!(saved["message"], "Quiz saved successfully!");
    assert!(!saved["quiz_id"].as_str().expect("quiz id").is_empty());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/get_questions", None, None))
        .await
        .expect("get questions");

    assert_eq!(response.status(), StatusCode::OK);
    let questions = test_support::read_json(response).await;
    let questions = questions.as_array().expect("question array");
    assert_eq!(questions.len(), 2);
    let texts: Vec<&str> =
        questions.iter().map(|q| q["question"].as_str().expect("question text")).collect();
    assert!(texts.contains(&"Capital of France?"));
    assert!(texts.contains(&"2 + 2?"));

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/get_timer", None, None))
        .await
        .expect("get timer");

    assert_eq!(response.status(), StatusCode::OK);
    let timer = test_support::read_json(response).await;
    assert_eq!(timer["duration"], 60);
}

#[tokio::test]
async fn save_requires_teacher_role() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/save", None, Some(quiz_payload())))
        .await
        .expect("save without role");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/save",
            Some("student"),
            Some(quiz_payload()),
        ))
        .await
        .expect("save as student");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn save_rejects_empty_question_list() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/save",
            Some("teacher"),
            Some(json!({"questions": [], "duration": 1})),
        ))
        .await
        .expect("save empty quiz");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_rejects_wrong_option_count() {
    let ctx = test_support::setup_test_context().await;

    let payload = json!({
        "questions": [
            {"question": "Q?", "options": ["a", "b"], "answer": "a"}
        ],
        "duration": 1
    });
    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::POST, "/save", Some("teacher"), Some(payload)))
        .await
        .expect("save bad options");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_questions_before_any_save_is_empty() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/get_questions", None, None))
        .await
        .expect("get questions");

    assert_eq!(response.status(), StatusCode::OK);
    let questions = test_support::read_json(response).await;
    assert_eq!(questions.as_array().expect("question array").len(), 0);
}

#[tokio::test]
async fn generate_rejects_empty_prompt() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/generate_quiz",
            Some("teacher"),
            Some(json!({"prompt": "   ", "ai_choice": "openai", "num_questions": 3})),
        ))
        .await
        .expect("generate with empty prompt");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_requires_teacher_role() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/generate_quiz",
            Some("student"),
            Some(json!({"prompt": "Roman history", "ai_choice": "openai", "num_questions": 3})),
        ))
        .await
        .expect("generate as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn generate_degrades_to_placeholder_when_no_provider_is_configured() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/generate_quiz",
            Some("teacher"),
            Some(json!({"prompt": "Roman history", "ai_choice": "openai", "num_questions": 3})),
        ))
        .await
        .expect("generate");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["degraded"], true);
    let quiz = body["quiz"].as_array().expect("quiz array");
    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0]["options"].as_array().expect("options").len(), 4);
}
