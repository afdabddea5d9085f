use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::errors::ApiError;
use crate::core::state::AppState;

pub(crate) const ROLE_HEADER: &str = "x-quiz-role";

/// Caller capability. There is no session state: the role travels on every
/// request in the `x-quiz-role` header and is passed into handlers explicitly.
/// An absent header means a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Teacher,
    Student,
}

pub(crate) struct CallerRole(pub(crate) Role);

impl CallerRole {
    pub(crate) fn require_teacher(&self) -> Result<(), ApiError> {
        match self.0 {
            Role::Teacher => Ok(()),
            Role::Student => Err(ApiError::Forbidden("Teacher role required")),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CallerRole {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ROLE_HEADER) else {
            return Ok(CallerRole(Role::Student));
        };

        let raw = value
            .to_str()
            .map_err(|_| ApiError::BadRequest("Invalid role header".to_string()))?;

        match raw.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(CallerRole(Role::Teacher)),
            "student" | "" => Ok(CallerRole(Role::Student)),
            other => Err(ApiError::BadRequest(format!("Unknown role '{other}'"))),
        }
    }
}
