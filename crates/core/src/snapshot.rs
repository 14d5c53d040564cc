//! Durable form of an exam in progress.
//!
//! The snapshot is a plain serde tree so any backend can store it as JSON.
//! Restoring is all-or-nothing: a snapshot either passes every check and becomes
//! an `ActiveExam`, or it is rejected as a whole.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exam::{ActiveExam, Cursor, ExamError};
use crate::model::{AnswerMap, ExamId, ExamSession, OptionIndex, Question, QuestionNumber};

/// Schema version written with every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("unsupported snapshot version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("answer key {0:?} is not a question number")]
    InvalidAnswerKey(String),

    #[error("question {number} is answered more than once")]
    DuplicateAnswer { number: QuestionNumber },

    #[error("questions are not in ascending order")]
    UnorderedQuestions,

    #[error("current page {0} is not a valid position")]
    InvalidCursor(usize),

    #[error(transparent)]
    Invariant(#[from] ExamError),
}

/// The exam part of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: ExamId,
    pub started_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

/// Everything needed to resume an exam after a restart.
///
/// Stored as `{ version, exam, answers, currentPage, savedAt }`. Answer keys are
/// stringified question numbers; values are 0-based option indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSnapshot {
    pub version: u32,
    pub exam: ExamRecord,
    pub answers: BTreeMap<String, OptionIndex>,
    pub current_page: usize,
    pub saved_at: DateTime<Utc>,
}

impl ExamSnapshot {
    #[must_use]
    pub fn capture(exam: &ActiveExam, saved_at: DateTime<Utc>) -> Self {
        let session = exam.session();
        Self {
            version: SNAPSHOT_VERSION,
            exam: ExamRecord {
                id: session.id().clone(),
                started_at: session.started_at(),
                questions: session.questions().to_vec(),
            },
            answers: exam
                .answers()
                .iter()
                .map(|(number, choice)| (number.to_string(), choice))
                .collect(),
            current_page: exam.cursor().position(),
            saved_at,
        }
    }

    /// Turn the snapshot back into an exam.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` when the version is unknown, an answer key is not
    /// the canonical form of a question number, two keys name the same question,
    /// the questions are out of order or the exam invariants do not hold.
    pub fn restore(self) -> Result<ActiveExam, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
            });
        }

        let mut parsed = BTreeMap::new();
        for (key, choice) in self.answers {
            let number = parse_answer_key(&key)?;
            if parsed.insert(number, choice).is_some() {
                return Err(SnapshotError::DuplicateAnswer { number });
            }
        }
        let answers: AnswerMap = parsed.into_iter().collect();

        let session =
            ExamSession::from_persisted(self.exam.id, self.exam.started_at, self.exam.questions)
                .ok_or(SnapshotError::UnorderedQuestions)?;
        let cursor =
            Cursor::new(self.current_page).ok_or(SnapshotError::InvalidCursor(self.current_page))?;

        Ok(ActiveExam::from_parts(session, answers, cursor)?)
    }
}

/// Only the exact form `capture` writes is accepted, so "01" or "+1" never
/// alias question 1.
fn parse_answer_key(key: &str) -> Result<QuestionNumber, SnapshotError> {
    key.parse::<QuestionNumber>()
        .ok()
        .filter(|number| number.to_string() == key)
        .ok_or_else(|| SnapshotError::InvalidAnswerKey(key.to_string()))
}
