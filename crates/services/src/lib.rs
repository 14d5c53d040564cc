#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod exam_service;
pub mod persistence;

pub use exam_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ExamServiceError, PersistenceError};
pub use exam_service::ExamService;
pub use persistence::{EXAM_SNAPSHOT_KEY, SnapshotPersistence};
