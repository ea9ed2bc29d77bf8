//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::BankError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    /// The history store could not be opened or written.
    #[error("could not save quiz history: {0}")]
    PersistenceWriteFailure(#[source] StorageError),
    #[error("could not read quiz history: {0}")]
    Read(#[source] StorageError),
}

/// Errors emitted while building a `QuizRunner`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    #[error("quiz runner must be created inside a Tokio runtime")]
    NoRuntime,
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid seconds per question: {raw}")]
    InvalidSeconds { raw: String },
    #[error("database url cannot be empty")]
    EmptyDbUrl,
    #[error(transparent)]
    Session(#[from] quiz_core::session::ConfigError),
    #[error("could not read question file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
}
