use std::sync::Arc;

use services::{Notice, QuizRunner};
use tokio::sync::{Mutex, mpsc};

/// Shared receiving end of the notifier channel.
pub type NoticeFeed = Arc<Mutex<mpsc::UnboundedReceiver<Notice>>>;

pub trait UiApp: Send + Sync {
    fn runner(&self) -> QuizRunner;

    /// Source of toast messages, if the composition root wired one up.
    fn notices(&self) -> Option<NoticeFeed> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    runner: QuizRunner,
    notices: Option<NoticeFeed>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            runner: app.runner(),
            notices: app.notices(),
        }
    }

    #[must_use]
    pub fn runner(&self) -> QuizRunner {
        self.runner.clone()
    }

    #[must_use]
    pub fn notices(&self) -> Option<NoticeFeed> {
        self.notices.clone()
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
