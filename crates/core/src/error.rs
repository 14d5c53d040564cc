use thiserror::Error;

use crate::exam::ExamError;
use crate::model::QuestionError;
use crate::snapshot::SnapshotError;

/// Any error raised by the exam domain.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Exam(#[from] ExamError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
