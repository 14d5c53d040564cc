//! JSON question-bank loader.
//!
//! The dataset is a list of chapters, each with its question rows. Only a string
//! `correct_answer` counts as an answer; any other JSON value is read as "no
//! answer" so the row is left out of exams instead of failing the whole file.

use std::path::Path;

use exam_core::model::{Chapter, QuestionBank, QuestionRecord};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("cannot read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct BankFile {
    chapters: Vec<ChapterRow>,
}

#[derive(Debug, Deserialize)]
struct ChapterRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    questions: Vec<QuestionRow>,
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    number: u32,
    text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: Value,
    #[serde(default)]
    is_critical: bool,
    #[serde(default)]
    has_image: bool,
    #[serde(default)]
    image_path: Option<String>,
}

impl From<QuestionRow> for QuestionRecord {
    fn from(row: QuestionRow) -> Self {
        let correct_answer = match row.correct_answer {
            Value::String(answer) => Some(answer),
            _ => None,
        };
        Self {
            number: row.number,
            text: row.text,
            options: row.options,
            correct_answer,
            is_critical: row.is_critical,
            has_image: row.has_image,
            image_path: row.image_path,
        }
    }
}

/// Parse a bank from its JSON text.
///
/// # Errors
///
/// Returns `BankLoadError::Json` if the text is not a bank document.
pub fn parse_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let file: BankFile = serde_json::from_str(json)?;
    let chapters = file
        .chapters
        .into_iter()
        .map(|chapter| Chapter {
            title: chapter.title,
            questions: chapter.questions.into_iter().map(QuestionRecord::from).collect(),
        })
        .collect::<Vec<_>>();

    let bank = QuestionBank::new(chapters);
    tracing::debug!(
        chapters = bank.chapters().len(),
        records = bank.total_records(),
        "parsed question bank"
    );
    Ok(bank)
}

/// Read and parse a bank file.
///
/// # Errors
///
/// Returns `BankLoadError` if the file cannot be read or parsed.
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let bank = parse_bank(&json)?;
    tracing::info!(path = %path.display(), records = bank.total_records(), "loaded question bank");
    Ok(bank)
}
