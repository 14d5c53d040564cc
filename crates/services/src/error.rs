//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::ExamError;
use exam_core::snapshot::SnapshotError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SnapshotPersistence`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] SnapshotError),
}

/// Errors emitted by `ExamService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamServiceError {
    #[error(transparent)]
    Exam(#[from] ExamError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
