//! Exam state and the pure transitions between states.
//!
//! Every user intent maps to one transition that takes the current state by
//! reference and returns the next state. A rejected intent returns an error and
//! leaves the caller holding the unchanged state.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{AnswerMap, ExamSession, OptionIndex, Question, QuestionNumber};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("no exam in progress")]
    NoActiveExam,

    #[error("question {number} is not part of this exam")]
    UnknownQuestion { number: QuestionNumber },

    #[error("question {number} has no option {label}")]
    InvalidOption { number: QuestionNumber, label: u16 },

    #[error("question {number} is already answered")]
    AlreadyAnswered { number: QuestionNumber },

    #[error("position {position} is outside 1..={len}")]
    OutOfRange { position: usize, len: usize },
}

//
// ─── CURSOR ────────────────────────────────────────────────────────────────────
//

/// 1-based position of the displayed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(usize);

impl Cursor {
    pub const FIRST: Cursor = Cursor(1);

    #[must_use]
    pub fn new(position: usize) -> Option<Self> {
        (position >= 1).then_some(Self(position))
    }

    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    fn prev(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::FIRST
    }
}

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// A discrete user action against the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamIntent {
    Start,
    Answer {
        number: QuestionNumber,
        choice: OptionIndex,
    },
    Advance,
    Retreat,
    /// Jump to a 1-based position picked from the question index.
    Jump(usize),
    Reset,
}

//
// ─── DERIVED VIEWS ─────────────────────────────────────────────────────────────
//

/// How a cell of the question index is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Correct,
    Incorrect,
    Unanswered,
}

/// How an option of the displayed question is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Nothing answered yet; the option can be picked.
    Selectable,
    Correct,
    ChosenWrong,
    Neutral,
}

impl OptionMark {
    #[must_use]
    pub fn for_option(question: &Question, chosen: Option<OptionIndex>, option: OptionIndex) -> Self {
        match chosen {
            None => Self::Selectable,
            Some(_) if question.is_correct(option) => Self::Correct,
            Some(choice) if choice == option => Self::ChosenWrong,
            Some(_) => Self::Neutral,
        }
    }
}

/// Answer counts for the whole exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
}

//
// ─── ACTIVE EXAM ───────────────────────────────────────────────────────────────
//

/// An exam in progress: the frozen session, the answers so far and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveExam {
    session: Arc<ExamSession>,
    answers: AnswerMap,
    cursor: Cursor,
}

impl ActiveExam {
    #[must_use]
    pub fn new(session: ExamSession) -> Self {
        Self {
            session: Arc::new(session),
            answers: AnswerMap::new(),
            cursor: Cursor::FIRST,
        }
    }

    /// Reassemble an exam from stored parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::OutOfRange` for a cursor past the last question,
    /// `ExamError::UnknownQuestion` for answers to questions outside the session
    /// and `ExamError::InvalidOption` for answers naming a missing option.
    pub fn from_parts(
        session: ExamSession,
        answers: AnswerMap,
        cursor: Cursor,
    ) -> Result<Self, ExamError> {
        let len = session.len();
        if cursor.position() > len.max(1) {
            return Err(ExamError::OutOfRange {
                position: cursor.position(),
                len,
            });
        }
        for (number, choice) in answers.iter() {
            let question = session
                .find(number)
                .ok_or(ExamError::UnknownQuestion { number })?;
            if !question.has_option(choice) {
                return Err(ExamError::InvalidOption {
                    number,
                    label: choice.label(),
                });
            }
        }

        Ok(Self {
            session: Arc::new(session),
            answers,
            cursor,
        })
    }

    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.session.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// The question under the cursor, or `None` for an empty session.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.session.at(self.cursor.position())
    }

    #[must_use]
    pub fn answer_for(&self, number: QuestionNumber) -> Option<OptionIndex> {
        self.answers.get(number)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.cursor.position() < self.session.len()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.cursor.position() > 1
    }

    #[must_use]
    pub fn status_at(&self, position: usize) -> Option<QuestionStatus> {
        let question = self.session.at(position)?;
        if position == self.cursor.position() {
            return Some(QuestionStatus::Current);
        }
        Some(match self.answers.get(question.number()) {
            Some(choice) if question.is_correct(choice) => QuestionStatus::Correct,
            Some(_) => QuestionStatus::Incorrect,
            None => QuestionStatus::Unanswered,
        })
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        let mut progress = Progress {
            total: self.session.len(),
            ..Progress::default()
        };
        for (number, choice) in self.answers.iter() {
            let Some(question) = self.session.find(number) else {
                continue;
            };
            progress.answered += 1;
            if question.is_correct(choice) {
                progress.correct += 1;
            } else {
                progress.incorrect += 1;
            }
        }
        progress
    }

    fn answer(&self, number: QuestionNumber, choice: OptionIndex) -> Result<Self, ExamError> {
        let question = self
            .session
            .find(number)
            .ok_or(ExamError::UnknownQuestion { number })?;
        if !question.has_option(choice) {
            return Err(ExamError::InvalidOption {
                number,
                label: choice.label(),
            });
        }
        let answers = self
            .answers
            .with_answer(number, choice)
            .ok_or(ExamError::AlreadyAnswered { number })?;

        Ok(Self {
            answers,
            ..self.clone()
        })
    }

    fn with_cursor(&self, cursor: Cursor) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    fn jump(&self, position: usize) -> Result<Self, ExamError> {
        let len = self.session.len();
        match Cursor::new(position) {
            Some(cursor) if position <= len => Ok(self.with_cursor(cursor)),
            _ => Err(ExamError::OutOfRange { position, len }),
        }
    }
}

//
// ─── EXAM STATE ────────────────────────────────────────────────────────────────
//

/// Whole exam state: either nothing started, or an exam in progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExamState {
    #[default]
    Empty,
    Active(ActiveExam),
}

impl ExamState {
    #[must_use]
    pub fn start(session: ExamSession) -> Self {
        Self::Active(ActiveExam::new(session))
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveExam> {
        match self {
            Self::Empty => None,
            Self::Active(exam) => Some(exam),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.active().map_or(Cursor::FIRST, ActiveExam::cursor)
    }

    /// Record an answer. Answers are final: a second answer is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` if no exam is active, the question is not in the exam,
    /// the option does not exist or the question was already answered.
    pub fn answer(&self, number: QuestionNumber, choice: OptionIndex) -> Result<Self, ExamError> {
        let exam = self.active().ok_or(ExamError::NoActiveExam)?;
        exam.answer(number, choice).map(Self::Active)
    }

    /// Move to the next question; saturates at the last one.
    #[must_use]
    pub fn advance(&self) -> Self {
        match self {
            Self::Active(exam) if exam.can_advance() => Self::Active(exam.with_cursor(exam.cursor.next())),
            other => other.clone(),
        }
    }

    /// Move to the previous question; saturates at the first one.
    #[must_use]
    pub fn retreat(&self) -> Self {
        match self {
            Self::Active(exam) if exam.can_retreat() => Self::Active(exam.with_cursor(exam.cursor.prev())),
            other => other.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns `ExamError::NoActiveExam` without an exam and
    /// `ExamError::OutOfRange` for positions outside `1..=len`.
    pub fn jump(&self, position: usize) -> Result<Self, ExamError> {
        let exam = self.active().ok_or(ExamError::NoActiveExam)?;
        exam.jump(position).map(Self::Active)
    }

    #[must_use]
    pub fn reset(&self) -> Self {
        Self::Empty
    }

    /// Apply an intent. `build` is only called for `ExamIntent::Start`.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying transition.
    pub fn apply(
        &self,
        intent: ExamIntent,
        build: impl FnOnce() -> ExamSession,
    ) -> Result<Self, ExamError> {
        match intent {
            ExamIntent::Start => Ok(Self::start(build())),
            ExamIntent::Answer { number, choice } => self.answer(number, choice),
            ExamIntent::Advance => Ok(self.advance()),
            ExamIntent::Retreat => Ok(self.retreat()),
            ExamIntent::Jump(position) => self.jump(position),
            ExamIntent::Reset => Ok(self.reset()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, ExamId, QuestionBank, QuestionRecord};
    use crate::time::fixed_now;

    fn n(value: u32) -> QuestionNumber {
        QuestionNumber::new(value).unwrap()
    }

    fn bank(numbers: &[u32]) -> QuestionBank {
        let questions = numbers
            .iter()
            .map(|&number| QuestionRecord {
                number,
                text: format!("Q{number}"),
                options: vec!["X".into(), "Y".into(), "Z".into()],
                correct_answer: Some("Y".into()),
                is_critical: false,
                has_image: false,
                image_path: None,
            })
            .collect();
        QuestionBank::new(vec![Chapter {
            title: "All".into(),
            questions,
        }])
    }

    fn started(numbers: &[u32]) -> ExamState {
        let session = ExamSession::build(&bank(numbers), ExamId::full(), fixed_now()).session;
        ExamState::start(session)
    }

    const X: OptionIndex = OptionIndex::new(0);
    const Y: OptionIndex = OptionIndex::new(1);

    #[test]
    fn start_opens_at_first_question() {
        let state = started(&[3, 1, 2]);
        let exam = state.active().unwrap();
        assert_eq!(exam.cursor(), Cursor::FIRST);
        assert!(exam.answers().is_empty());
        assert_eq!(exam.current().unwrap().number(), n(1));
    }

    #[test]
    fn answer_then_read_back() {
        let state = started(&[1, 2, 3]).answer(n(1), X).unwrap();
        assert_eq!(state.active().unwrap().answer_for(n(1)), Some(X));
    }

    #[test]
    fn second_answer_is_rejected() {
        let state = started(&[1, 2]).answer(n(1), X).unwrap();
        let err = state.answer(n(1), Y).unwrap_err();
        assert_eq!(err, ExamError::AlreadyAnswered { number: n(1) });
        assert_eq!(state.active().unwrap().answer_for(n(1)), Some(X));
    }

    #[test]
    fn answer_validates_question_and_option() {
        let state = started(&[1, 2]);
        assert_eq!(
            state.answer(n(9), X).unwrap_err(),
            ExamError::UnknownQuestion { number: n(9) }
        );
        assert_eq!(
            state.answer(n(1), OptionIndex::new(3)).unwrap_err(),
            ExamError::InvalidOption { number: n(1), label: 4 }
        );
        assert_eq!(
            ExamState::Empty.answer(n(1), X).unwrap_err(),
            ExamError::NoActiveExam
        );
    }

    #[test]
    fn navigation_saturates_at_bounds() {
        let state = started(&[1, 2, 3]);
        assert_eq!(state.retreat(), state);

        let state = state.advance().advance().advance().advance();
        assert_eq!(state.cursor().position(), 3);
        assert_eq!(state.advance(), state);

        let state = state.retreat();
        assert_eq!(state.cursor().position(), 2);
    }

    #[test]
    fn navigation_without_exam_is_noop() {
        assert_eq!(ExamState::Empty.advance(), ExamState::Empty);
        assert_eq!(ExamState::Empty.retreat(), ExamState::Empty);
        assert_eq!(ExamState::Empty.cursor(), Cursor::FIRST);
    }

    #[test]
    fn empty_session_has_no_current_question() {
        let state = started(&[]);
        let exam = state.active().unwrap();
        assert!(exam.current().is_none());
        assert!(!exam.can_advance());
        assert_eq!(state.advance(), state);
        assert!(state.jump(1).is_err());
    }

    #[test]
    fn jump_rejects_out_of_range() {
        let state = started(&[1, 2, 3]);
        assert_eq!(state.jump(3).unwrap().cursor().position(), 3);
        assert_eq!(
            state.jump(0).unwrap_err(),
            ExamError::OutOfRange { position: 0, len: 3 }
        );
        assert_eq!(
            state.jump(4).unwrap_err(),
            ExamError::OutOfRange { position: 4, len: 3 }
        );
        assert_eq!(ExamState::Empty.jump(1).unwrap_err(), ExamError::NoActiveExam);
    }

    #[test]
    fn reset_is_idempotent() {
        let state = started(&[1]).answer(n(1), Y).unwrap();
        assert_eq!(state.reset(), ExamState::Empty);
        assert_eq!(ExamState::Empty.reset(), ExamState::Empty);
    }

    #[test]
    fn walkthrough_matches_expected_states() {
        let state = ExamState::Empty
            .apply(ExamIntent::Start, || {
                ExamSession::build(&bank(&[1, 2, 3]), ExamId::full(), fixed_now()).session
            })
            .unwrap();
        let numbers: Vec<u32> = state
            .active()
            .unwrap()
            .session()
            .questions()
            .iter()
            .map(|q| q.number().value())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let state = state
            .apply(ExamIntent::Answer { number: n(1), choice: X }, || unreachable!())
            .unwrap();
        let state = state.apply(ExamIntent::Advance, || unreachable!()).unwrap();
        assert_eq!(state.cursor().position(), 2);
        let state = state.advance().advance();
        assert_eq!(state.cursor().position(), 3);

        let state = state.apply(ExamIntent::Reset, || unreachable!()).unwrap();
        assert_eq!(state, ExamState::Empty);
    }

    #[test]
    fn statuses_follow_precedence() {
        let state = started(&[1, 2, 3, 4])
            .answer(n(1), Y)
            .unwrap()
            .answer(n(2), X)
            .unwrap()
            .jump(2)
            .unwrap();
        let exam = state.active().unwrap();

        assert_eq!(exam.status_at(1), Some(QuestionStatus::Correct));
        assert_eq!(exam.status_at(2), Some(QuestionStatus::Current));
        assert_eq!(exam.status_at(3), Some(QuestionStatus::Unanswered));
        assert_eq!(exam.status_at(5), None);

        let exam = state.jump(4).unwrap();
        assert_eq!(exam.active().unwrap().status_at(2), Some(QuestionStatus::Incorrect));
    }

    #[test]
    fn progress_counts_answers() {
        let state = started(&[1, 2, 3])
            .answer(n(1), Y)
            .unwrap()
            .answer(n(3), X)
            .unwrap();
        let progress = state.active().unwrap().progress();
        assert_eq!(
            progress,
            Progress {
                total: 3,
                answered: 2,
                correct: 1,
                incorrect: 1,
            }
        );
    }

    #[test]
    fn option_marks_reveal_after_answer() {
        let state = started(&[1]);
        let question = state.active().unwrap().current().unwrap().clone();

        assert_eq!(OptionMark::for_option(&question, None, X), OptionMark::Selectable);
        assert_eq!(OptionMark::for_option(&question, Some(X), X), OptionMark::ChosenWrong);
        assert_eq!(OptionMark::for_option(&question, Some(X), Y), OptionMark::Correct);
        assert_eq!(
            OptionMark::for_option(&question, Some(X), OptionIndex::new(2)),
            OptionMark::Neutral
        );
        assert_eq!(OptionMark::for_option(&question, Some(Y), Y), OptionMark::Correct);
    }

    #[test]
    fn from_parts_checks_invariants() {
        let session = ExamSession::build(&bank(&[1, 2]), ExamId::full(), fixed_now()).session;
        let answers: AnswerMap = [(n(1), X)].into_iter().collect();

        assert!(ActiveExam::from_parts(session.clone(), answers.clone(), Cursor::new(2).unwrap()).is_ok());
        assert!(ActiveExam::from_parts(session.clone(), answers, Cursor::new(3).unwrap()).is_err());

        let stray: AnswerMap = [(n(7), X)].into_iter().collect();
        assert!(ActiveExam::from_parts(session.clone(), stray, Cursor::FIRST).is_err());

        let bad_option: AnswerMap = [(n(2), OptionIndex::new(9))].into_iter().collect();
        assert!(ActiveExam::from_parts(session, bad_option, Cursor::FIRST).is_err());
    }
}
