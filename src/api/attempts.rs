use axum::extract::State;
use axum::Json;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::attempt::{
    StartQuizRequest, StartQuizResponse, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::services::{leaderboard, scoring};
use crate::stores::models::ResultRecord;

pub(crate) async fn start_quiz(
    State(state): State<AppState>,
    Json(payload): Json<StartQuizRequest>,
) -> Result<Json<StartQuizResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let student = payload.student.trim();
    if student.is_empty() {
        return Err(ApiError::BadRequest("student name is required".to_string()));
    }

    let quiz = state.quiz_store().load().await;
    if !quiz.is_saved() {
        return Err(ApiError::NotFound("No quiz has been saved yet".to_string()));
    }

    let record = state
        .result_store()
        .start_attempt(student, &quiz.quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start attempt"))?;

    Ok(Json(StartQuizResponse {
        start_time: record.start_time.unwrap_or_default(),
        duration: quiz.duration,
        quiz_id: quiz.quiz_id,
    }))
}

pub(crate) async fn submit_quiz(
    State(state): State<AppState>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<Json<SubmitQuizResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let student = payload.student.trim();
    if student.is_empty() {
        return Err(ApiError::BadRequest("student name is required".to_string()));
    }

    let quiz = state.quiz_store().load().await;
    if !quiz.is_saved() {
        return Err(ApiError::NotFound("No quiz has been saved yet".to_string()));
    }

    // Submissions always score against the active quiz; the payload quiz_id
    // only keys the result record for clients that carried it from start.
    let quiz_id =
        if payload.quiz_id.is_empty() { quiz.quiz_id.clone() } else { payload.quiz_id.clone() };

    let (score, total) = scoring::score(&quiz, &payload.answers);

    state
        .result_store()
        .record_submission(student, &quiz_id, score, total)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to record submission"))?;

    Ok(Json(SubmitQuizResponse { score, total }))
}

pub(crate) async fn get_leaderboard(State(state): State<AppState>) -> Json<Vec<ResultRecord>> {
    let records = state.result_store().all().await;
    Json(leaderboard::rank(records))
}
