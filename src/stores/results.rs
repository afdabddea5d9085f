use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::config::Settings;
use crate::core::time::now_rfc3339;
use crate::stores::models::ResultRecord;
use crate::stores::{read_document, write_document, StoreError};

/// Whole-document store over the JSON array of result records. Every mutation
/// reads the full array, updates it in memory, and rewrites the file while
/// holding the store mutex, so concurrent submissions cannot lose updates.
#[derive(Clone)]
pub(crate) struct ResultStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl ResultStore {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self { path: settings.storage().results_path(), lock: Arc::new(Mutex::new(())) }
    }

    /// Idempotent attempt start: an existing `(student, quiz_id)` record is
    /// returned with its original start time; otherwise a zeroed record is
    /// appended with `start_time = now`.
    pub(crate) async fn start_attempt(
        &self,
        student: &str,
        quiz_id: &str,
    ) -> Result<ResultRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<ResultRecord> = read_document(&self.path).await.unwrap_or_default();

        if let Some(existing) = records.iter().find(|record| record.matches(student, quiz_id)) {
            return Ok(existing.clone());
        }

        let record = ResultRecord {
            student: student.to_string(),
            quiz_id: quiz_id.to_string(),
            score: Some(0),
            total: Some(0),
            start_time: Some(now_rfc3339()),
            timestamp: None,
        };
        records.push(record.clone());
        write_document(&self.path, &records).await?;

        tracing::info!(student = %student, quiz_id = %quiz_id, "Attempt started");

        Ok(record)
    }

    /// Upserts the scored record for `(student, quiz_id)`. The submission
    /// timestamp is refreshed on every successful submit.
    pub(crate) async fn record_submission(
        &self,
        student: &str,
        quiz_id: &str,
        score: u32,
        total: u32,
    ) -> Result<ResultRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<ResultRecord> = read_document(&self.path).await.unwrap_or_default();

        let now = now_rfc3339();
        let updated = match records.iter_mut().find(|record| record.matches(student, quiz_id)) {
            Some(existing) => {
                existing.score = Some(score);
                existing.total = Some(total);
                existing.timestamp = Some(now);
                existing.clone()
            }
            None => {
                let record = ResultRecord {
                    student: student.to_string(),
                    quiz_id: quiz_id.to_string(),
                    score: Some(score),
                    total: Some(total),
                    start_time: None,
                    timestamp: Some(now),
                };
                records.push(record.clone());
                record
            }
        };

        write_document(&self.path, &records).await?;

        tracing::info!(student = %student, quiz_id = %quiz_id, score, total, "Submission recorded");

        Ok(updated)
    }

    /// All records in append order. A missing file is an empty result set.
    pub(crate) async fn all(&self) -> Vec<ResultRecord> {
        let _guard = self.lock.lock().await;
        read_document(&self.path).await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::ResultStore;
    use crate::stores::test_paths::temp_store_file;

    fn store() -> ResultStore {
        ResultStore { path: temp_store_file("results.json"), lock: Arc::new(Mutex::new(())) }
    }

    #[tokio::test]
    async fn start_attempt_is_idempotent() {
        let store = store();

        let first = store.start_attempt("alice", "quiz-1").await.expect("first start");
        let second = store.start_attempt("alice", "quiz-1").await.expect("second start");

        assert_eq!(first.start_time, second.start_time);
        assert_eq!(store.all().await.len(), 1);
    }

    #[tokio::test]
    async fn start_attempt_zeroes_score_and_total() {
        let store = store();

        let record = store.start_attempt("bob", "quiz-1").await.expect("start");
        assert_eq!(record.score, Some(0));
        assert_eq!(record.total, Some(0));
        assert!(record.start_time.is_some());
        assert!(record.timestamp.is_none());
    }

    #[tokio::test]
    async fn record_submission_updates_existing_record() {
        let store = store();

        store.start_attempt("alice", "quiz-1").await.expect("start");
        store.record_submission("alice", "quiz-1", 3, 5).await.expect("submit");

        let records = store.all().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, Some(3));
        assert_eq!(records[0].total, Some(5));
        assert!(records[0].start_time.is_some());
        assert!(records[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn record_submission_appends_when_no_attempt_was_started() {
        let store = store();

        store.record_submission("carol", "quiz-2", 2, 2).await.expect("submit");

        let records = store.all().await;
        assert_eq!(records.len(), 1);
        assert!(records[0].matches("carol", "quiz-2"));
    }

    #[tokio::test]
    async fn records_preserve_student_and_quiz_id_as_upsert_key() {
        let store = store();

        store.start_attempt("alice", "quiz-1").await.expect("start alice");
        store.start_attempt("bob", "quiz-1").await.expect("start bob");
        store.record_submission("alice", "quiz-1", 1, 2).await.expect("submit alice");

        let records = store.all().await;
        assert_eq!(records.len(), 2);
        assert!(records[0].matches("alice", "quiz-1"));
        assert!(records[1].matches("bob", "quiz-1"));
        assert_eq!(records[0].score, Some(1));
        assert_eq!(records[1].score, Some(0));
    }

    #[tokio::test]
    async fn same_student_different_quiz_gets_a_second_record() {
        let store = store();

        store.start_attempt("alice", "quiz-1").await.expect("start quiz-1");
        store.start_attempt("alice", "quiz-2").await.expect("start quiz-2");

        assert_eq!(store.all().await.len(), 2);
    }
}
