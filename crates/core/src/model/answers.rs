use std::collections::BTreeMap;

use crate::model::ids::{OptionIndex, QuestionNumber};

/// Which option the user picked for each answered question.
///
/// Entries are only ever added; the whole map is dropped on reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerMap {
    entries: BTreeMap<QuestionNumber, OptionIndex>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, number: QuestionNumber) -> Option<OptionIndex> {
        self.entries.get(&number).copied()
    }

    #[must_use]
    pub fn contains(&self, number: QuestionNumber) -> bool {
        self.entries.contains_key(&number)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionNumber, OptionIndex)> + '_ {
        self.entries.iter().map(|(number, choice)| (*number, *choice))
    }

    /// Returns a copy with `choice` recorded, or `None` if `number` was already answered.
    #[must_use]
    pub fn with_answer(&self, number: QuestionNumber, choice: OptionIndex) -> Option<Self> {
        if self.contains(number) {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.insert(number, choice);
        Some(Self { entries })
    }
}

impl FromIterator<(QuestionNumber, OptionIndex)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionNumber, OptionIndex)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
