use std::sync::Arc;

use crate::core::config::Settings;
use crate::services::generation::QuizGenerator;
use crate::stores::{quiz::QuizStore, results::ResultStore};

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    quiz_store: QuizStore,
    result_store: ResultStore,
    generator: QuizGenerator,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        quiz_store: QuizStore,
        result_store: ResultStore,
        generator: QuizGenerator,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, quiz_store, result_store, generator }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn quiz_store(&self) -> &QuizStore {
        &self.inner.quiz_store
    }

    pub(crate) fn result_store(&self) -> &ResultStore {
        &self.inner.result_store
    }

    pub(crate) fn generator(&self) -> &QuizGenerator {
        &self.inner.generator
    }
}
