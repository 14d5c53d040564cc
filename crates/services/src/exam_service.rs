use std::sync::Arc;

use exam_core::exam::ExamIntent;
use exam_core::model::{ExamId, ExamSession, QuestionBank};
use exam_core::ExamState;
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::ExamServiceError;
use crate::persistence::SnapshotPersistence;

/// Drives exam state transitions and mirrors every change into storage.
///
/// The service holds no exam state itself: callers pass the current state in
/// and keep the returned one.
#[derive(Clone)]
pub struct ExamService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    eligible: usize,
    persistence: SnapshotPersistence,
}

impl ExamService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, kv: Arc<dyn KeyValueStore>) -> Self {
        let built = ExamSession::build(&bank, ExamId::full(), clock.now());
        for skipped in &built.skipped {
            warn!(
                number = skipped.number,
                chapter = %skipped.chapter,
                reason = %skipped.reason,
                "question left out of exams"
            );
        }
        for number in &built.duplicates {
            warn!(%number, "duplicate question number; keeping first");
        }

        Self {
            clock,
            bank,
            eligible: built.session.len(),
            persistence: SnapshotPersistence::new(clock, kv),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Number of questions a full exam will contain.
    #[must_use]
    pub fn eligible_questions(&self) -> usize {
        self.eligible
    }

    /// Load the exam in progress at startup, or `ExamState::Empty`.
    pub async fn restore(&self) -> ExamState {
        self.persistence
            .load()
            .await
            .map_or(ExamState::Empty, ExamState::Active)
    }

    /// Apply `intent` to `state` and persist the result.
    ///
    /// Persistence is best effort: write failures are logged and the new state
    /// is returned regardless.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Exam` when the transition rejects the intent;
    /// `state` is then still current.
    pub async fn dispatch(
        &self,
        state: &ExamState,
        intent: ExamIntent,
    ) -> Result<ExamState, ExamServiceError> {
        let next = state
            .apply(intent, || self.build_session())
            .inspect_err(|err| debug!(?intent, error = %err, "intent rejected"))?;

        match (&intent, &next) {
            (ExamIntent::Reset, _) => {
                info!("exam reset");
                if let Err(err) = self.persistence.clear().await {
                    warn!(error = %err, "failed to clear stored exam");
                }
            }
            (_, ExamState::Active(exam)) if next != *state || intent == ExamIntent::Start => {
                if let Err(err) = self.persistence.save(exam).await {
                    warn!(error = %err, "failed to store exam progress");
                }
            }
            _ => {}
        }

        Ok(next)
    }

    fn build_session(&self) -> ExamSession {
        let built = ExamSession::build(&self.bank, ExamId::full(), self.clock.now());
        info!(questions = built.session.len(), "exam started");
        built.session
    }
}
