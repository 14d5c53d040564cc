use std::sync::Arc;

use exam_core::model::QuestionBank;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::exam_service::ExamService;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    exam_service: Arc<ExamService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        bank: Arc<QuestionBank>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, bank, clock))
    }

    /// Build services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory(bank: Arc<QuestionBank>, clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), bank, clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, bank: Arc<QuestionBank>, clock: Clock) -> Self {
        let exam_service = Arc::new(ExamService::new(clock, bank, Arc::clone(&storage.kv)));
        Self { exam_service }
    }

    #[must_use]
    pub fn exam_service(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam_service)
    }
}
