use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionIndex, QuestionNumber};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question number must be positive")]
    InvalidNumber,

    #[error("question {number} has no options")]
    NoOptions { number: u32 },

    #[error("question {number} has too many options ({len})")]
    TooManyOptions { number: u32, len: usize },

    #[error("question {number} has no correct answer")]
    MissingCorrectAnswer { number: u32 },

    #[error("correct answer of question {number} is not one of its options")]
    CorrectAnswerNotAnOption { number: u32 },

    #[error("correct option {index} of question {number} is out of range")]
    CorrectIndexOutOfRange { number: u32, index: usize },
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// A question row as it appears in the bank dataset.
///
/// `correct_answer` is `None` when the dataset holds anything but a string there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub number: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub is_critical: bool,
    pub has_image: bool,
    pub image_path: Option<String>,
}

impl QuestionRecord {
    /// Whether the record carries a usable correct answer at all.
    #[must_use]
    pub fn has_correct_answer(&self) -> bool {
        self.correct_answer
            .as_deref()
            .is_some_and(|answer| !answer.is_empty())
    }

    /// Resolve the free-form answer into an option index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the number is zero, the option list is empty,
    /// or the correct answer does not match any option.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let number = QuestionNumber::new(self.number).ok_or(QuestionError::InvalidNumber)?;
        let answer = self
            .correct_answer
            .as_deref()
            .filter(|answer| !answer.is_empty())
            .ok_or(QuestionError::MissingCorrectAnswer {
                number: self.number,
            })?;
        let position = self
            .options
            .iter()
            .position(|option| option == answer)
            .ok_or(QuestionError::CorrectAnswerNotAnOption {
                number: self.number,
            })?;
        let correct = OptionIndex::from_position(position).ok_or(
            QuestionError::TooManyOptions {
                number: self.number,
                len: self.options.len(),
            },
        )?;

        Question::new(
            number,
            self.text,
            self.options,
            correct,
            self.is_critical,
            QuestionImage::from_flags(self.has_image, self.image_path),
        )
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Illustration attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum QuestionImage {
    None,
    /// Image named after the question number.
    Conventional,
    /// Image at a path given by the dataset.
    Explicit(String),
}

impl QuestionImage {
    #[must_use]
    pub fn from_flags(has_image: bool, image_path: Option<String>) -> Self {
        match (has_image, image_path) {
            (false, _) => Self::None,
            (true, Some(path)) if !path.trim().is_empty() => Self::Explicit(path),
            (true, _) => Self::Conventional,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedQuestion", into = "PersistedQuestion")]
pub struct Question {
    number: QuestionNumber,
    text: String,
    options: Vec<String>,
    correct: OptionIndex,
    is_critical: bool,
    image: QuestionImage,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if `options` is empty or `correct` is out of range.
    pub fn new(
        number: QuestionNumber,
        text: impl Into<String>,
        options: Vec<String>,
        correct: OptionIndex,
        is_critical: bool,
        image: QuestionImage,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions {
                number: number.value(),
            });
        }
        if options.len() > usize::from(u8::MAX) + 1 {
            return Err(QuestionError::TooManyOptions {
                number: number.value(),
                len: options.len(),
            });
        }
        if correct.position() >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                number: number.value(),
                index: correct.position(),
            });
        }

        Ok(Self {
            number,
            text: text.into(),
            options,
            correct,
            is_critical,
            image,
        })
    }

    #[must_use]
    pub fn number(&self) -> QuestionNumber {
        self.number
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> Option<&str> {
        self.options.get(index.position()).map(String::as_str)
    }

    #[must_use]
    pub fn has_option(&self, index: OptionIndex) -> bool {
        index.position() < self.options.len()
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.option(self.correct).unwrap_or_default()
    }

    #[must_use]
    pub fn is_correct(&self, choice: OptionIndex) -> bool {
        self.correct == choice
    }

    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    #[must_use]
    pub fn image(&self) -> &QuestionImage {
        &self.image
    }

    /// Iterate options paired with their index.
    pub fn indexed_options(&self) -> impl Iterator<Item = (OptionIndex, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(pos, text)| OptionIndex::from_position(pos).map(|idx| (idx, text.as_str())))
    }
}

/// Serialized form of a question inside a persisted snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedQuestion {
    number: QuestionNumber,
    text: String,
    options: Vec<String>,
    correct: OptionIndex,
    #[serde(default)]
    is_critical: bool,
    #[serde(default = "no_image")]
    image: QuestionImage,
}

fn no_image() -> QuestionImage {
    QuestionImage::None
}

impl TryFrom<PersistedQuestion> for Question {
    type Error = QuestionError;

    fn try_from(value: PersistedQuestion) -> Result<Self, Self::Error> {
        Question::new(
            value.number,
            value.text,
            value.options,
            value.correct,
            value.is_critical,
            value.image,
        )
    }
}

impl From<Question> for PersistedQuestion {
    fn from(value: Question) -> Self {
        Self {
            number: value.number,
            text: value.text,
            options: value.options,
            correct: value.correct,
            is_critical: value.is_critical,
            image: value.image,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
