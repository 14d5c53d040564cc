#![forbid(unsafe_code)]

pub mod error;
pub mod exam;
pub mod model;
pub mod snapshot;
pub mod time;

pub use error::Error;
pub use exam::{ActiveExam, Cursor, ExamError, ExamState};
pub use time::Clock;
