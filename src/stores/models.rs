use serde::{Deserialize, Serialize};

/// One multiple-choice question. Immutable once the quiz is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Question {
    #[serde(default)]
    pub(crate) question: String,
    #[serde(default)]
    pub(crate) options: Vec<String>,
    #[serde(default)]
    pub(crate) answer: String,
}

/// The single active quiz. A save replaces the prior quiz entirely; there is
/// no versioning and no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Quiz {
    #[serde(default)]
    pub(crate) quiz_id: String,
    #[serde(default)]
    pub(crate) questions: Vec<Question>,
    /// Seconds.
    #[serde(default)]
    pub(crate) duration: u64,
}

impl Quiz {
    pub(crate) fn is_saved(&self) -> bool {
        !self.quiz_id.is_empty()
    }
}

/// One student's attempt against one quiz, keyed by `(student, quiz_id)` and
/// upserted in place. Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ResultRecord {
    pub(crate) student: String,
    pub(crate) quiz_id: String,
    #[serde(default)]
    pub(crate) score: Option<u32>,
    #[serde(default)]
    pub(crate) total: Option<u32>,
    #[serde(default)]
    pub(crate) start_time: Option<String>,
    #[serde(default)]
    pub(crate) timestamp: Option<String>,
}

impl ResultRecord {
    pub(crate) fn matches(&self, student: &str, quiz_id: &str) -> bool {
        self.student == student && self.quiz_id == quiz_id
    }
}
