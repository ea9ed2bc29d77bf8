//! Non-blocking user notifications (the "toast" collaborator).

use quiz_core::model::HistoryId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    HistorySaved(HistoryId),
    HistorySaveFailed(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::HistorySaved(_) => "Quiz history saved successfully".to_string(),
            Notice::HistorySaveFailed(reason) => format!("Could not save quiz history: {reason}"),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::HistorySaveFailed(_))
    }
}

/// Receives notices. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!("{}", notice.message());
        } else {
            tracing::info!("{}", notice.message());
        }
    }
}

/// Forwards notices to an unbounded channel for a front-end to display.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // A closed receiver means nobody is listening anymore.
        if self.tx.send(notice).is_err() {
            tracing::debug!("notice dropped: receiver closed");
        }
    }
}
