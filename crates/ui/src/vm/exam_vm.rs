use exam_core::ActiveExam;
use exam_core::exam::{OptionMark, Progress, QuestionStatus};
use exam_core::model::{ImageCatalog, OptionIndex, QuestionNumber};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: OptionIndex,
    pub label: u16,
    pub text: String,
    pub mark: OptionMark,
    pub checked: bool,
}

impl OptionVm {
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.mark != OptionMark::Selectable
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.mark {
            OptionMark::Selectable => "exam-option exam-option--selectable",
            OptionMark::Correct => "exam-option exam-option--correct",
            OptionMark::ChosenWrong => "exam-option exam-option--wrong",
            OptionMark::Neutral => "exam-option exam-option--neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageVm {
    pub src: String,
    pub alt: String,
}

/// The question under the cursor, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: QuestionNumber,
    pub heading: String,
    pub critical: bool,
    pub images: Vec<ImageVm>,
    pub options: Vec<OptionVm>,
    pub reveal: Option<String>,
    pub can_retreat: bool,
    pub can_advance: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexCellVm {
    pub position: usize,
    pub number: QuestionNumber,
    pub status: QuestionStatus,
}

impl IndexCellVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.status {
            QuestionStatus::Current => "index-cell index-cell--current",
            QuestionStatus::Correct => "index-cell index-cell--correct",
            QuestionStatus::Incorrect => "index-cell index-cell--incorrect",
            QuestionStatus::Unanswered => "index-cell index-cell--unanswered",
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Question {}", self.number)
    }
}

/// Map the current question of `exam`. `None` for an exam without questions.
#[must_use]
pub fn map_current_question(exam: &ActiveExam, images: &ImageCatalog) -> Option<QuestionVm> {
    let question = exam.current()?;
    let chosen = exam.answer_for(question.number());

    let options = question
        .indexed_options()
        .map(|(index, text)| OptionVm {
            index,
            label: index.label(),
            text: text.to_owned(),
            mark: OptionMark::for_option(question, chosen, index),
            checked: chosen == Some(index),
        })
        .collect();

    let images = images
        .resolve(question)
        .into_iter()
        .map(|path| ImageVm {
            alt: format!(
                "Question {}",
                path.file_stem()
                    .map_or_else(|| question.number().to_string(), |stem| stem.to_string_lossy().into_owned())
            ),
            src: path.to_string_lossy().into_owned(),
        })
        .collect();

    let reveal = chosen.map(|choice| {
        let mark = if question.is_correct(choice) { "✅" } else { "❌" };
        format!("Correct answer: {} {mark}", question.correct_text())
    });

    Some(QuestionVm {
        number: question.number(),
        heading: format!("Question {}: {}", exam.cursor().position(), question.text()),
        critical: question.is_critical(),
        images,
        options,
        reveal,
        can_retreat: exam.can_retreat(),
        can_advance: exam.can_advance(),
    })
}

#[must_use]
pub fn map_index_cells(exam: &ActiveExam) -> Vec<IndexCellVm> {
    exam.session()
        .questions()
        .iter()
        .enumerate()
        .filter_map(|(offset, question)| {
            let position = offset + 1;
            exam.status_at(position).map(|status| IndexCellVm {
                position,
                number: question.number(),
                status,
            })
        })
        .collect()
}

#[must_use]
pub fn progress_label(progress: Progress) -> String {
    format!(
        "Answered {}/{} · {} correct · {} wrong",
        progress.answered, progress.total, progress.correct, progress.incorrect
    )
}

#[must_use]
pub fn start_label(eligible: usize) -> String {
    format!("Start full exam ({eligible} questions)")
}
