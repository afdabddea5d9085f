use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct StartQuizRequest {
    #[validate(length(min = 1, message = "student name is required"))]
    pub(crate) student: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartQuizResponse {
    pub(crate) start_time: String,
    /// Seconds.
    pub(crate) duration: u64,
    pub(crate) quiz_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SubmitQuizRequest {
    #[validate(length(min = 1, message = "student name is required"))]
    pub(crate) student: String,
    #[serde(default)]
    pub(crate) quiz_id: String,
    #[serde(default)]
    pub(crate) answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitQuizResponse {
    pub(crate) score: u32,
    pub(crate) total: u32,
}
