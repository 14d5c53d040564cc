mod answers;
mod bank;
mod ids;
mod media;
mod question;
mod session;

pub use ids::{ExamId, OptionIndex, ParseIdError, QuestionNumber};

pub use answers::AnswerMap;
pub use bank::{Chapter, QuestionBank, SkippedRecord};
pub use media::{ImageCatalog, SPLIT_IMAGE_QUESTION};
pub use question::{PersistedQuestion, Question, QuestionError, QuestionImage, QuestionRecord};
pub use session::{BuiltSession, ExamSession};
