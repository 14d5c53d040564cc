use std::sync::Arc;

use exam_core::ActiveExam;
use exam_core::snapshot::ExamSnapshot;
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::PersistenceError;

/// Storage key holding the exam in progress.
pub const EXAM_SNAPSHOT_KEY: &str = "exam_history";

/// Mirrors the exam in progress into a key-value store as one JSON snapshot.
#[derive(Clone)]
pub struct SnapshotPersistence {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl SnapshotPersistence {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    /// Overwrite the stored snapshot with `exam`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the write fails.
    pub async fn save(&self, exam: &ActiveExam) -> Result<(), PersistenceError> {
        let snapshot = ExamSnapshot::capture(exam, self.clock.now());
        let json = serde_json::to_string(&snapshot)?;
        self.kv.put(EXAM_SNAPSHOT_KEY, &json).await?;
        Ok(())
    }

    /// Read the stored exam, if there is a valid one.
    ///
    /// Absent, unreadable or invalid snapshots all yield `None`.
    pub async fn load(&self) -> Option<ActiveExam> {
        let raw = match self.kv.get(EXAM_SNAPSHOT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "snapshot read failed; starting empty");
                return None;
            }
        };

        match decode(&raw) {
            Ok(exam) => {
                info!(
                    questions = exam.len(),
                    answered = exam.answers().len(),
                    cursor = exam.cursor().position(),
                    "restored exam in progress"
                );
                Some(exam)
            }
            Err(err) => {
                debug!(error = %err, "discarding stored snapshot");
                None
            }
        }
    }

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the store cannot be written.
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.kv.remove(EXAM_SNAPSHOT_KEY).await?;
        Ok(())
    }
}

/// Parse and validate a stored snapshot.
///
/// # Errors
///
/// Returns `PersistenceError::Json` for text that is not a complete snapshot
/// and `PersistenceError::Invalid` for a snapshot that fails validation.
pub fn decode(raw: &str) -> Result<ActiveExam, PersistenceError> {
    let snapshot: ExamSnapshot = serde_json::from_str(raw)?;
    Ok(snapshot.restore()?)
}
