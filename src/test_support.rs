use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::api;
use crate::api::guards::ROLE_HEADER;
use crate::core::{config::Settings, state::AppState};
use crate::services::generation::QuizGenerator;
use crate::stores::{quiz::QuizStore, results::ResultStore};

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("QUIZDECK_ENV", "test");
    std::env::set_var("QUIZDECK_STRICT_CONFIG", "0");

    // Fresh data dir per context so store files never leak between tests.
    let data_dir = std::env::temp_dir().join(format!("quizdeck-test-{}", Uuid::new_v4()));
    std::env::set_var("QUIZDECK_DATA_DIR", &data_dir);

    std::env::remove_var("QUIZDECK_QUIZ_FILE");
    std::env::remove_var("QUIZDECK_RESULTS_FILE");
    std::env::remove_var("DEFAULT_QUIZ_DURATION_SECONDS");
    std::env::remove_var("BACKEND_CORS_ORIGINS");
    std::env::remove_var("AI_PRIMARY_BASE_URL");
    std::env::remove_var("AI_PRIMARY_API_KEY");
    std::env::remove_var("AI_SECONDARY_BASE_URL");
    std::env::remove_var("AI_SECONDARY_API_KEY");
    std::env::set_var("AI_REQUEST_TIMEOUT", "1");
}

pub(crate) async fn setup_test_context() -> TestContext {
    let guard = env_lock().await;
    set_test_env();

    let settings = Settings::load().expect("settings");
    let quiz_store = QuizStore::from_settings(&settings);
    let result_store = ResultStore::from_settings(&settings);
    let generator = QuizGenerator::from_settings(&settings).expect("generator");

    let state = AppState::new(settings, quiz_store, result_store, generator);
    let app = api::router::router(state.clone());

    TestContext { state, app, _guard: guard }
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    role: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(role) = role {
        builder = builder.header(ROLE_HEADER, role);
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
