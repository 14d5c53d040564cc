mod exam;
mod state;

pub use exam::{ExamScreen, ExamTab, ExamView};
#[cfg(test)]
pub(crate) use exam::ExamTestHandles;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
