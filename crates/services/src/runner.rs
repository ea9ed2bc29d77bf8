//! Drives a [`QuizSession`] for a front-end.
//!
//! The runner is the single owner of the session. User actions and timer ticks
//! are serialized through one async mutex; each question state gets its own
//! countdown task, identified by the session's [`QuestionTicket`]. A task whose
//! ticket no longer matches exits without touching the session.
//!
//! Timers are armed and cancelled only while the session lock is held, and the
//! timer slot remembers the ticket it was armed for, so an older ticket can
//! never replace or abort a newer countdown.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use quiz_core::model::HistoryRecord;
use quiz_core::{Advance, QuestionTicket, QuizSession, QuizSnapshot, Tick};
use tokio::runtime::Handle;
use tokio::sync::{Mutex as AsyncMutex, watch};
use tokio::task::JoinHandle;

use crate::error::RunnerError;
use crate::history_service::HistoryService;
use crate::notify::{Notice, Notifier};

/// Cloneable handle to one running quiz.
#[derive(Clone)]
pub struct QuizRunner {
    inner: Arc<Inner>,
}

struct Inner {
    session: AsyncMutex<QuizSession>,
    snapshots: watch::Sender<QuizSnapshot>,
    history: Arc<HistoryService>,
    notifier: Arc<dyn Notifier>,
    tick_interval: Duration,
    runtime: Handle,
    timer: Mutex<Option<Armed>>,
}

struct Armed {
    ticket: QuestionTicket,
    handle: JoinHandle<()>,
}

impl QuizRunner {
    /// Wrap a session. Must be called from within a Tokio runtime; timer and
    /// persistence tasks are spawned onto that runtime.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::NoRuntime` outside a Tokio runtime.
    pub fn new(
        session: QuizSession,
        history: Arc<HistoryService>,
        notifier: Arc<dyn Notifier>,
        tick_interval: Duration,
    ) -> Result<Self, RunnerError> {
        let runtime = Handle::try_current().map_err(|_| RunnerError::NoRuntime)?;
        let (snapshots, _) = watch::channel(session.snapshot());
        Ok(Self {
            inner: Arc::new(Inner {
                session: AsyncMutex::new(session),
                snapshots,
                history,
                notifier,
                tick_interval,
                runtime,
                timer: Mutex::new(None),
            }),
        })
    }

    /// Arms the countdown for the current question.
    pub async fn start(&self) {
        let session = self.inner.session.lock().await;
        if session.is_finished() {
            return;
        }
        self.inner.arm(session.ticket());
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every state change (answers, ticks, navigation).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.snapshots.subscribe()
    }

    /// Submit a guess for the current question. Returns whether it was correct.
    pub async fn submit_answer(&self, raw: &str) -> bool {
        let mut session = self.inner.session.lock().await;
        let correct = session.submit_answer(raw);
        self.inner.publish(&session);
        if correct {
            // The countdown stops once the question is answered.
            self.inner.cancel_timer(session.ticket());
        }
        correct
    }

    /// Skip, or move on after a correct answer.
    pub async fn advance(&self) -> Advance {
        let mut session = self.inner.session.lock().await;
        let advance = session.advance();
        self.inner.publish(&session);
        self.inner.after_advance(&advance, session.ticket());
        advance
    }

    /// Start over from the first question.
    pub async fn restart(&self) {
        let mut session = self.inner.session.lock().await;
        session.restart();
        self.inner.publish(&session);
        let ticket = session.ticket();
        tracing::debug!(ticket = ticket.value(), "quiz restarted");
        self.inner.arm(ticket);
    }
}

impl Inner {
    fn publish(&self, session: &QuizSession) {
        self.snapshots.send_replace(session.snapshot());
    }

    /// Replaces the running countdown unless it belongs to a newer ticket.
    fn arm(self: &Arc<Self>, ticket: QuestionTicket) {
        let mut slot = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|armed| armed.ticket > ticket) {
            tracing::trace!(ticket = ticket.value(), "stale countdown not armed");
            return;
        }
        let handle = self.runtime.spawn(countdown(Arc::clone(self), ticket));
        if let Some(previous) = slot.replace(Armed { ticket, handle }) {
            previous.handle.abort();
        }
        tracing::trace!(ticket = ticket.value(), "countdown armed");
    }

    /// Stops the countdown for `ticket` or any older one.
    fn cancel_timer(&self, ticket: QuestionTicket) {
        let mut slot = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|armed| armed.ticket > ticket) {
            return;
        }
        if let Some(previous) = slot.take() {
            previous.handle.abort();
        }
    }

    fn after_advance(self: &Arc<Self>, advance: &Advance, ticket: QuestionTicket) {
        match advance {
            Advance::Next(index) => {
                tracing::debug!(index, "next question");
                self.arm(ticket);
            }
            Advance::Finished(record) => {
                self.cancel_timer(ticket);
                self.persist(record.clone());
            }
            Advance::AlreadyFinished => {}
        }
    }

    /// Fire-and-forget history write. The session never waits on it.
    fn persist(&self, record: HistoryRecord) {
        let history = Arc::clone(&self.history);
        let notifier = Arc::clone(&self.notifier);
        tracing::info!(
            score = record.score,
            total = record.total_questions,
            "quiz finished"
        );
        self.runtime.spawn(async move {
            match history.save(&record).await {
                Ok(id) => notifier.notify(Notice::HistorySaved(id)),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to save quiz history");
                    notifier.notify(Notice::HistorySaveFailed(err.to_string()));
                }
            }
        });
    }
}

/// One question's countdown. Reschedules itself only while the question is
/// still open; hands over to a fresh task when the session moves on.
async fn countdown(inner: Arc<Inner>, ticket: QuestionTicket) {
    loop {
        tokio::time::sleep(inner.tick_interval).await;

        let mut session = inner.session.lock().await;
        if session.ticket() != ticket {
            return;
        }
        let tick = session.tick();
        if tick != Tick::Ignored {
            inner.publish(&session);
        }

        match tick {
            Tick::Counting(_) => {}
            Tick::Ignored => return,
            Tick::TimedOut(advance) => {
                tracing::debug!(ticket = ticket.value(), "question timed out");
                inner.after_advance(&advance, session.ticket());
                return;
            }
        }
    }
}
