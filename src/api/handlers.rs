use std::collections::HashMap;

use axum::{extract::State, Json};

use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root() -> Json<RootResponse> {
    let response = RootResponse {
        message: "Quizdeck API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(response)
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut status = "healthy".to_string();
    let mut components = HashMap::new();

    let quiz = state.quiz_store().load().await;
    components.insert(
        "quiz_store".to_string(),
        if quiz.is_saved() { "saved".to_string() } else { "empty".to_string() },
    );

    let records = state.result_store().all().await;
    components.insert("result_store".to_string(), format!("{} records", records.len()));

    let data_dir = &state.settings().storage().data_dir;
    if let Err(err) = tokio::fs::create_dir_all(data_dir).await {
        components.insert("data_dir".to_string(), format!("unwritable: {err}"));
        status = "unhealthy".to_string();
    } else {
        components.insert("data_dir".to_string(), "writable".to_string());
    }

    Json(HealthResponse { service: "quizdeck-api".to_string(), status, components })
}
