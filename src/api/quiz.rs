use axum::extract::State;
use axum::Json;
use rand::seq::SliceRandom;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CallerRole;
use crate::core::state::AppState;
use crate::schemas::quiz::{
    GenerateQuizRequest, GenerateQuizResponse, SaveQuizRequest, SaveQuizResponse, TimerResponse,
};
use crate::services::generation::GenerationError;
use crate::stores::models::Question;

pub(crate) async fn save_quiz(
    role: CallerRole,
    State(state): State<AppState>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<Json<SaveQuizResponse>, ApiError> {
    role.require_teacher()?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let questions: Vec<Question> = payload.questions.into_iter().map(Question::from).collect();
    let quiz_id = state
        .quiz_store()
        .save(questions, payload.duration)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to save quiz"))?;

    Ok(Json(SaveQuizResponse {
        status: "success".to_string(),
        message: "Quiz saved successfully!".to_string(),
        quiz_id,
    }))
}

pub(crate) async fn generate_quiz(
    role: CallerRole,
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>, ApiError> {
    role.require_teacher()?;

    let generated = state
        .generator()
        .generate(&payload.prompt, &payload.ai_choice, payload.num_questions)
        .await
        .map_err(|err| match err {
            GenerationError::EmptyPrompt => ApiError::BadRequest("Prompt is required".to_string()),
        })?;

    Ok(Json(GenerateQuizResponse {
        quiz: generated.questions,
        degraded: generated.degraded,
        provider: generated.provider,
    }))
}

/// Questions in randomized order for the student view. The answer field is
/// intentionally part of the payload; grading still happens server-side.
pub(crate) async fn get_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    let quiz = state.quiz_store().load().await;

    let mut questions = quiz.questions;
    questions.shuffle(&mut rand::thread_rng());

    Json(questions)
}

pub(crate) async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    let quiz = state.quiz_store().load().await;
    Json(TimerResponse { duration: quiz.duration })
}

#[cfg(test)]
mod tests;
