use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number printed next to a question in the official bank.
///
/// Always positive; doubles as the stable ordering key of an exam.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuestionNumber(u32);

impl QuestionNumber {
    /// Creates a new `QuestionNumber`, rejecting zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for QuestionNumber {
    type Error = ParseIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ParseIdError::new("QuestionNumber"))
    }
}

impl From<QuestionNumber> for u32 {
    fn from(number: QuestionNumber) -> Self {
        number.0
    }
}

/// Zero-based position of an option inside a question's option list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionIndex(u8);

impl OptionIndex {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Converts a list position, failing for lists longer than 256 options.
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        u8::try_from(position).ok().map(Self)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        usize::from(self.0)
    }

    /// The 1-based label shown next to the option.
    #[must_use]
    pub fn label(&self) -> u16 {
        u16::from(self.0) + 1
    }
}

/// Identifier of an exam session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamId(String);

impl ExamId {
    /// The exam made of every eligible question in the bank.
    pub const FULL: &'static str = "full-exam";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn full() -> Self {
        Self::new(Self::FULL)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionNumber({})", self.0)
    }
}

impl fmt::Debug for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionIndex({})", self.0)
    }
}

impl fmt::Debug for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExamId({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an identifier from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl ParseIdError {
    fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(QuestionNumber::new)
            .ok_or_else(|| ParseIdError::new("QuestionNumber"))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
