use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::config::Settings;
use crate::stores::models::{Question, Quiz};
use crate::stores::{read_document, write_document, StoreError};

/// Whole-document store for the single active quiz. The mutex serializes the
/// read-modify-write cycle on the backing file; last save wins.
#[derive(Clone)]
pub(crate) struct QuizStore {
    path: PathBuf,
    default_duration_seconds: u64,
    lock: Arc<Mutex<()>>,
}

impl QuizStore {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self {
            path: settings.storage().quiz_path(),
            default_duration_seconds: settings.quiz().default_duration_seconds,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replaces the persisted quiz with a fresh one and returns its id.
    /// Duration arrives in minutes and is stored in seconds.
    pub(crate) async fn save(
        &self,
        questions: Vec<Question>,
        duration_minutes: u64,
    ) -> Result<String, StoreError> {
        let quiz = Quiz {
            quiz_id: Uuid::new_v4().to_string(),
            questions,
            // The payload only enforces a lower bound on the duration, so the
            // conversion must not overflow on absurd input.
            duration: duration_minutes.saturating_mul(60),
        };

        let _guard = self.lock.lock().await;
        write_document(&self.path, &quiz).await?;

        tracing::info!(
            quiz_id = %quiz.quiz_id,
            questions = quiz.questions.len(),
            duration_seconds = quiz.duration,
            "Quiz saved"
        );

        Ok(quiz.quiz_id)
    }

    /// Returns the persisted quiz. Absence is a valid state: an empty quiz
    /// with the configured default duration comes back instead of an error.
    pub(crate) async fn load(&self) -> Quiz {
        let _guard = self.lock.lock().await;
        read_document(&self.path).await.unwrap_or_else(|| self.empty_quiz())
    }

    fn empty_quiz(&self) -> Quiz {
        Quiz {
            quiz_id: String::new(),
            questions: Vec::new(),
            duration: self.default_duration_seconds,
        }
    }
}
