use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::model::ids::QuestionNumber;
use crate::model::question::{Question, QuestionImage};

/// Question number whose illustration is split across two files.
pub const SPLIT_IMAGE_QUESTION: u32 = 153;

/// Resolves question illustrations to files under a base directory.
///
/// Images are named `<number>.jpg` unless the dataset gives a path or the
/// question is listed as an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    base_dir: PathBuf,
    overrides: HashMap<QuestionNumber, Vec<String>>,
}

impl ImageCatalog {
    /// A catalog with the bank's known overrides.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let mut catalog = Self::without_overrides(base_dir);
        if let Some(number) = QuestionNumber::new(SPLIT_IMAGE_QUESTION) {
            catalog.overrides.insert(
                number,
                vec![
                    format!("{SPLIT_IMAGE_QUESTION}_1.jpg"),
                    format!("{SPLIT_IMAGE_QUESTION}_2.jpg"),
                ],
            );
        }
        catalog
    }

    #[must_use]
    pub fn without_overrides(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, number: QuestionNumber, files: Vec<String>) -> Self {
        self.overrides.insert(number, files);
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Files to show for `question`, in display order. Empty when it has no image.
    #[must_use]
    pub fn resolve(&self, question: &Question) -> Vec<PathBuf> {
        match question.image() {
            QuestionImage::None => Vec::new(),
            QuestionImage::Explicit(path) => match self.overrides.get(&question.number()) {
                Some(files) => self.join_all(files),
                None => vec![self.base_dir.join(path.trim_start_matches('/'))],
            },
            QuestionImage::Conventional => match self.overrides.get(&question.number()) {
                Some(files) => self.join_all(files),
                None => vec![self.base_dir.join(format!("{}.jpg", question.number()))],
            },
        }
    }

    fn join_all(&self, files: &[String]) -> Vec<PathBuf> {
        files.iter().map(|file| self.base_dir.join(file)).collect()
    }
}
