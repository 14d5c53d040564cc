use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::model::bank::{QuestionBank, SkippedRecord};
use crate::model::ids::{ExamId, QuestionNumber};
use crate::model::question::Question;

/// A frozen, ordered set of questions the user is working through.
///
/// Built once from the bank; later changes to the bank never reach an
/// existing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSession {
    id: ExamId,
    started_at: DateTime<Utc>,
    questions: Vec<Question>,
}

/// Result of building a session, with the records that had to be left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSession {
    pub session: ExamSession,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates: Vec<QuestionNumber>,
}

impl ExamSession {
    /// Build the full exam: every answerable question, ascending by number.
    ///
    /// Never fails; an empty bank gives an empty session. When a number repeats,
    /// the first occurrence in chapter order wins.
    #[must_use]
    pub fn build(bank: &QuestionBank, id: ExamId, started_at: DateTime<Utc>) -> BuiltSession {
        let (mut questions, skipped) = bank.questions();
        questions.sort_by_key(Question::number);

        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        questions.retain(|question| {
            let fresh = seen.insert(question.number());
            if !fresh {
                duplicates.push(question.number());
            }
            fresh
        });

        BuiltSession {
            session: Self {
                id,
                started_at,
                questions,
            },
            skipped,
            duplicates,
        }
    }

    /// Rehydrate a session from persisted parts.
    ///
    /// Returns `None` unless the questions are strictly ascending by number.
    #[must_use]
    pub fn from_persisted(
        id: ExamId,
        started_at: DateTime<Utc>,
        questions: Vec<Question>,
    ) -> Option<Self> {
        let ascending = questions
            .windows(2)
            .all(|pair| pair[0].number() < pair[1].number());
        ascending.then_some(Self {
            id,
            started_at,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ExamId {
        &self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a 1-based position.
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Question> {
        position
            .checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }

    #[must_use]
    pub fn find(&self, number: QuestionNumber) -> Option<&Question> {
        self.questions
            .binary_search_by_key(&number, Question::number)
            .ok()
            .map(|index| &self.questions[index])
    }
}
