use crate::model::question::{Question, QuestionError, QuestionRecord};

/// A chapter of the bank as read from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chapter {
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}

/// The static, read-only collection of all exam questions grouped by chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    chapters: Vec<Chapter>,
}

/// A bank record that could not become a `Question`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub chapter: String,
    pub number: u32,
    pub reason: QuestionError,
}

impl QuestionBank {
    #[must_use]
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.questions.len()).sum()
    }

    /// Every record whose correct answer is a non-empty string, flattened in chapter order.
    pub fn answerable_records(&self) -> impl Iterator<Item = (&Chapter, &QuestionRecord)> {
        self.chapters.iter().flat_map(|chapter| {
            chapter
                .questions
                .iter()
                .filter(|record| record.has_correct_answer())
                .map(move |record| (chapter, record))
        })
    }

    /// Convert answerable records into questions.
    ///
    /// Records without a string answer are ignored. Records that carry an answer
    /// but are otherwise malformed are returned in the second list so callers can
    /// report them.
    #[must_use]
    pub fn questions(&self) -> (Vec<Question>, Vec<SkippedRecord>) {
        let mut questions = Vec::new();
        let mut skipped = Vec::new();

        for (chapter, record) in self.answerable_records() {
            match record.clone().into_question() {
                Ok(question) => questions.push(question),
                Err(reason) => skipped.push(SkippedRecord {
                    chapter: chapter.title.clone(),
                    number: record.number,
                    reason,
                }),
            }
        }

        (questions, skipped)
    }
}
