use std::sync::Arc;

use quiz_core::model::{HistoryId, HistoryRecord};
use storage::repository::{HistoryRepository, HistoryRow};

use crate::error::HistoryError;

/// Persistence boundary for completed quiz runs.
#[derive(Clone)]
pub struct HistoryService {
    repo: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    #[must_use]
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    /// Append a completed run to the history store.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::PersistenceWriteFailure` if the store cannot be
    /// opened or written.
    pub async fn save(&self, record: &HistoryRecord) -> Result<HistoryId, HistoryError> {
        let id = self
            .repo
            .append_history(record)
            .await
            .map_err(HistoryError::PersistenceWriteFailure)?;
        tracing::info!(
            %id,
            score = record.score,
            total = record.total_questions,
            attempts = record.attempts.len(),
            "quiz history saved"
        );
        Ok(id)
    }

    /// Most recent saved runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Read` on storage failures.
    pub async fn recent(&self, limit: u32) -> Result<Vec<HistoryRow>, HistoryError> {
        self.repo.list_history(limit).await.map_err(HistoryError::Read)
    }
}
