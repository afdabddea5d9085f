use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::stores::models::Question;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct QuestionPayload {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub(crate) question: String,
    #[validate(length(min = 4, max = 4, message = "exactly 4 options are required"))]
    pub(crate) options: Vec<String>,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub(crate) answer: String,
}

impl From<QuestionPayload> for Question {
    fn from(payload: QuestionPayload) -> Self {
        Question { question: payload.question, options: payload.options, answer: payload.answer }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SaveQuizRequest {
    #[validate(length(min = 1, message = "add at least one question"), nested)]
    pub(crate) questions: Vec<QuestionPayload>,
    /// Minutes; persisted as seconds.
    #[validate(range(min = 1, message = "duration must be positive"))]
    pub(crate) duration: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveQuizResponse {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) quiz_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateQuizRequest {
    #[serde(default)]
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) ai_choice: String,
    #[serde(default = "default_num_questions")]
    pub(crate) num_questions: u64,
}

fn default_num_questions() -> u64 {
    5
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateQuizResponse {
    pub(crate) quiz: Vec<Question>,
    pub(crate) degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TimerResponse {
    /// Seconds.
    pub(crate) duration: u64,
}
