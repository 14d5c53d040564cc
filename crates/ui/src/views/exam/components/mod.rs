mod index;
mod question;
mod start;

pub use index::QuestionIndexPanel;
pub use question::QuestionPanel;
pub use start::StartPanel;
