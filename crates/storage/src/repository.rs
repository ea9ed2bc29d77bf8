use async_trait::async_trait;
use quiz_core::model::{HistoryId, HistoryRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A saved history record together with the key the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: HistoryId,
    pub record: HistoryRecord,
}

impl HistoryRow {
    #[must_use]
    pub fn new(id: HistoryId, record: HistoryRecord) -> Self {
        Self { id, record }
    }
}

/// Append-only store of completed quiz runs, keyed by an auto-incrementing id.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist a completed run and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be opened or written.
    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryId, StorageError>;

    /// Fetch one saved run by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_history(&self, id: HistoryId) -> Result<HistoryRecord, StorageError>;

    /// List saved runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn list_history(&self, limit: u32) -> Result<Vec<HistoryRow>, StorageError>;
}

/// In-memory history store for tests and for running without a database.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    history: Arc<Mutex<BTreeMap<HistoryId, HistoryRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryId, StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = HistoryId::new(next);
        guard.insert(id, record.clone());
        Ok(id)
    }

    async fn get_history(&self, id: HistoryId) -> Result<HistoryRecord, StorageError> {
        let guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_history(&self, limit: u32) -> Result<Vec<HistoryRow>, StorageError> {
        let guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(guard
            .iter()
            .rev()
            .take(limit)
            .map(|(id, record)| HistoryRow::new(*id, record.clone()))
            .collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryRepository::new());
        Self { history }
    }
}
