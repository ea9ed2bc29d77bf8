use std::sync::Arc;

use quiz_core::QuizSession;
use storage::repository::Storage;

use crate::Clock;
use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::notify::Notifier;
use crate::runner::QuizRunner;

/// Assembles app-facing services around one quiz run.
#[derive(Clone)]
pub struct AppServices {
    config: QuizConfig,
    history: Arc<HistoryService>,
    runner: QuizRunner,
}

impl AppServices {
    /// Build services backed by `SQLite` storage at `config.db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails, the question
    /// bank cannot be loaded, or no Tokio runtime is running.
    pub async fn new_sqlite(
        config: QuizConfig,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Self::from_storage(config, storage, clock, notifier)
    }

    /// Build services with a process-local history store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the question bank cannot be loaded or no
    /// Tokio runtime is running.
    pub fn in_memory(
        config: QuizConfig,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(config, Storage::in_memory(), clock, notifier)
    }

    fn from_storage(
        config: QuizConfig,
        storage: Storage,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppServicesError> {
        let bank = config.load_bank()?;
        let session = QuizSession::new(bank, config.session_config()?, clock);
        let history = Arc::new(HistoryService::new(storage.history));
        let runner = QuizRunner::new(
            session,
            Arc::clone(&history),
            notifier,
            config.tick_interval,
        )?;

        Ok(Self {
            config,
            history,
            runner,
        })
    }

    #[must_use]
    pub fn runner(&self) -> QuizRunner {
        self.runner.clone()
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }
}
