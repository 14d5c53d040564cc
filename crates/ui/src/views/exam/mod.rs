mod components;
mod view;

pub use view::{ExamScreen, ExamTab, ExamView};
#[cfg(test)]
pub(crate) use view::ExamTestHandles;
