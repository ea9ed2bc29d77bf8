//! The quiz-run state machine.
//!
//! A `QuizSession` walks a [`QuestionBank`] one question at a time. Every
//! mutation goes through [`QuizSession::submit_answer`], [`QuizSession::tick`],
//! [`QuizSession::advance`] and [`QuizSession::restart`]; callers serialize
//! those calls (one user action or one timer tick at a time).

use thiserror::Error;

use crate::model::{Attempt, HistoryRecord, Question, QuestionBank};
use crate::time::Clock;

pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("seconds per question must be at least 1")]
    ZeroSeconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    seconds_per_question: u32,
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroSeconds` if `seconds_per_question` is 0.
    pub fn new(seconds_per_question: u32) -> Result<Self, ConfigError> {
        if seconds_per_question == 0 {
            return Err(ConfigError::ZeroSeconds);
        }
        Ok(Self {
            seconds_per_question,
        })
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Feedback for the most recent submission on the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Incorrect, try again!",
        }
    }
}

/// Observable state of a quiz run.
///
/// Only [`QuizSession`] mutates it; everyone else gets a shared reference or a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_question_index: usize,
    pub attempts_this_question: u32,
    pub seconds_remaining: u32,
    pub answered_correctly: bool,
    pub score: u32,
    pub attempt_log: Vec<Attempt>,
    pub finished: bool,
    pub feedback: Option<Feedback>,
}

impl SessionState {
    #[must_use]
    pub fn initial(seconds_per_question: u32) -> Self {
        Self {
            current_question_index: 0,
            attempts_this_question: 0,
            seconds_remaining: seconds_per_question,
            answered_correctly: false,
            score: 0,
            attempt_log: Vec::new(),
            finished: false,
            feedback: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::InProgress(self.current_question_index)
        }
    }

    /// Attempts logged against the question currently shown.
    pub fn current_attempts(&self) -> impl Iterator<Item = &Attempt> {
        let index = self.current_question_index;
        self.attempt_log
            .iter()
            .filter(move |a| a.question_index == index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress(usize),
    Finished,
}

/// Identity of the question state a timer continuation was armed for.
///
/// Bumped by every `advance` and `restart`; a tick carrying an older ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QuestionTicket(u64);

impl QuestionTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of moving past the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at this index.
    Next(usize),
    /// The last question was passed; carries the one history record of this run.
    Finished(HistoryRecord),
    /// The run had already finished; nothing changed and nothing is emitted.
    AlreadyFinished,
}

/// Result of one elapsed second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Finished, or the current question is already answered correctly.
    Ignored,
    /// Still counting; seconds left.
    Counting(u32),
    /// The countdown hit zero and the session moved on.
    TimedOut(Advance),
}

/// Read-only copy of everything a view needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub state: SessionState,
    /// `None` once the run is finished.
    pub question: Option<Question>,
    pub total_questions: usize,
    pub ticket: QuestionTicket,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

pub struct QuizSession {
    questions: QuestionBank,
    config: SessionConfig,
    clock: Clock,
    state: SessionState,
    ticket: QuestionTicket,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: QuestionBank, config: SessionConfig, clock: Clock) -> Self {
        Self {
            state: SessionState::initial(config.seconds_per_question()),
            questions,
            config,
            clock,
            ticket: QuestionTicket::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn ticket(&self) -> QuestionTicket {
        self.ticket
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Question currently shown, or `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.state.finished {
            return None;
        }
        self.questions.get(self.state.current_question_index)
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            state: self.state.clone(),
            question: self.current_question().cloned(),
            total_questions: self.total_questions(),
            ticket: self.ticket,
        }
    }

    /// Records a guess for the current question and returns whether it was correct.
    ///
    /// No-op returning `false` when the run is finished, the question is already
    /// answered correctly, or `raw` is blank after trimming.
    pub fn submit_answer(&mut self, raw: &str) -> bool {
        if self.state.finished || self.state.answered_correctly || raw.trim().is_empty() {
            return false;
        }
        let index = self.state.current_question_index;
        let Some(question) = self.questions.get(index) else {
            return false;
        };

        self.state.attempts_this_question += 1;
        let is_correct = question.is_correct(raw);
        self.state.attempt_log.push(Attempt::new(
            index,
            question.text(),
            raw,
            is_correct,
            self.state.attempts_this_question,
        ));

        if is_correct {
            self.state.answered_correctly = true;
            self.state.score = self.state.score.saturating_add(1);
            self.state.feedback = Some(Feedback::Correct);
        } else {
            self.state.feedback = Some(Feedback::Incorrect);
        }
        is_correct
    }

    /// One elapsed second on the current question's countdown.
    pub fn tick(&mut self) -> Tick {
        if self.state.finished || self.state.answered_correctly {
            return Tick::Ignored;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining > 0 {
            return Tick::Counting(self.state.seconds_remaining);
        }

        if self.state.attempts_this_question == 0 {
            let index = self.state.current_question_index;
            let text = self
                .questions
                .get(index)
                .map(Question::text)
                .unwrap_or_default();
            self.state.attempts_this_question = 1;
            self.state.attempt_log.push(Attempt::timed_out(index, text));
        }

        Tick::TimedOut(self.advance())
    }

    /// Moves to the next question (skip, "Next", or timeout), finishing after the last.
    pub fn advance(&mut self) -> Advance {
        if self.state.finished {
            return Advance::AlreadyFinished;
        }

        self.state.attempts_this_question = 0;
        self.state.answered_correctly = false;
        self.state.seconds_remaining = self.config.seconds_per_question();
        self.state.feedback = None;
        self.ticket = self.ticket.next();

        let next = self.state.current_question_index + 1;
        if next < self.questions.len() {
            self.state.current_question_index = next;
            return Advance::Next(next);
        }

        self.state.finished = true;
        Advance::Finished(self.history_record())
    }

    /// Back to the first question with a clean score and empty log.
    pub fn restart(&mut self) {
        self.state = SessionState::initial(self.config.seconds_per_question());
        self.ticket = self.ticket.next();
    }

    fn history_record(&self) -> HistoryRecord {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        HistoryRecord::new(
            self.clock.now(),
            self.state.score.min(total),
            total,
            self.state.attempt_log.clone(),
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_ANSWER;
    use crate::time::{fixed_clock, fixed_now};

    fn reference_session() -> QuizSession {
        QuizSession::new(
            QuestionBank::reference(),
            SessionConfig::default(),
            fixed_clock(),
        )
    }

    fn two_question_session() -> QuizSession {
        let bank = QuestionBank::from_questions(vec![
            Question::choice(
                "Which planet is closest to the Sun?",
                ["Venus", "Mercury"],
                "Mercury",
            )
            .unwrap(),
            Question::free_text("What is the value of 12 + 28?", "40").unwrap(),
        ])
        .unwrap();
        QuizSession::new(bank, SessionConfig::default(), fixed_clock())
    }

    fn skip_to(session: &mut QuizSession, index: usize) {
        while session.state().current_question_index < index {
            assert!(matches!(session.advance(), Advance::Next(_)));
        }
    }

    #[test]
    fn starts_in_progress_at_first_question() {
        let session = reference_session();
        assert_eq!(session.state(), &SessionState::initial(30));
        assert_eq!(session.state().phase(), SessionPhase::InProgress(0));
        assert_eq!(session.total_questions(), 10);
    }

    #[test]
    fn wrong_guesses_each_log_one_attempt() {
        let mut session = reference_session();
        for (n, guess) in ["Venus", "Earth", "Mars"].into_iter().enumerate() {
            assert!(!session.submit_answer(guess));
            let expected = u32::try_from(n + 1).unwrap();
            assert_eq!(session.state().attempts_this_question, expected);
            assert_eq!(session.state().current_attempts().count(), n + 1);
            assert_eq!(session.state().attempt_log.last().unwrap().attempt_number, expected);
        }
        assert_eq!(session.state().feedback, Some(Feedback::Incorrect));
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn trimmed_free_text_answer_is_correct() {
        let mut session = reference_session();
        skip_to(&mut session, 5);
        assert_eq!(
            session.current_question().unwrap().text(),
            "What is the value of 12 + 28?"
        );

        assert!(session.submit_answer(" 40 "));
        assert_eq!(session.state().score, 1);
        let attempts: Vec<_> = session.state().current_attempts().collect();
        assert_eq!(attempts.len(), 1);
        assert!(attempts[0].is_correct);
        assert_eq!(attempts[0].selected_answer, " 40 ");
        assert_eq!(session.state().feedback, Some(Feedback::Correct));
    }

    #[test]
    fn answer_comparison_ignores_case() {
        let mut session = reference_session();
        assert!(session.submit_answer("mercury"));
        assert!(session.state().answered_correctly);
    }

    #[test]
    fn submit_after_correct_is_noop() {
        let mut session = reference_session();
        assert!(session.submit_answer("Mercury"));
        let before = session.state().clone();

        assert!(!session.submit_answer("Mercury"));
        assert!(!session.submit_answer("Venus"));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn blank_submission_is_rejected() {
        let mut session = two_question_session();
        session.advance();
        assert!(!session.submit_answer("   "));
        assert!(!session.submit_answer(""));
        assert_eq!(session.state().attempts_this_question, 0);
        assert!(session.state().attempt_log.is_empty());
    }

    #[test]
    fn thirty_ticks_time_out_with_one_synthetic_attempt() {
        let mut session = reference_session();
        for expected in (1..30).rev() {
            assert_eq!(session.tick(), Tick::Counting(expected));
        }
        assert_eq!(session.tick(), Tick::TimedOut(Advance::Next(1)));

        let log = &session.state().attempt_log;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].selected_answer, NO_ANSWER);
        assert_eq!(log[0].attempt_number, 1);
        assert_eq!(log[0].question_index, 0);
        assert!(!log[0].is_correct);
        assert_eq!(session.state().seconds_remaining, 30);
        assert_eq!(session.state().attempts_this_question, 0);
    }

    #[test]
    fn timeout_after_wrong_guess_adds_no_synthetic_attempt() {
        let mut session = reference_session();
        assert!(!session.submit_answer("Venus"));
        for _ in 0..30 {
            session.tick();
        }
        assert_eq!(session.state().current_question_index, 1);
        assert_eq!(session.state().attempt_log.len(), 1);
        assert_eq!(session.state().attempt_log[0].selected_answer, "Venus");
    }

    #[test]
    fn timeout_on_last_question_finishes() {
        let mut session = two_question_session();
        session.advance();
        let mut last = Tick::Ignored;
        for _ in 0..30 {
            last = session.tick();
        }
        let Tick::TimedOut(Advance::Finished(record)) = last else {
            panic!("expected finish, got {last:?}");
        };
        assert!(session.is_finished());
        assert_eq!(record.attempts.len(), 1);
        assert_eq!(record.total_questions, 2);
    }

    #[test]
    fn tick_is_ignored_after_correct_answer_or_finish() {
        let mut session = two_question_session();
        assert!(session.submit_answer("Mercury"));
        assert_eq!(session.tick(), Tick::Ignored);
        assert_eq!(session.state().seconds_remaining, 30);

        session.advance();
        session.advance();
        assert!(session.is_finished());
        assert_eq!(session.tick(), Tick::Ignored);
    }

    #[test]
    fn skip_records_no_attempt() {
        let mut session = reference_session();
        assert!(!session.submit_answer("Earth"));
        assert_eq!(session.advance(), Advance::Next(1));
        assert_eq!(session.state().attempt_log.len(), 1);
        assert_eq!(session.state().feedback, None);
        assert!(!session.state().answered_correctly);
    }

    #[test]
    fn final_advance_emits_exactly_one_record() {
        let mut session = reference_session();
        assert!(session.submit_answer("Mercury"));
        skip_to(&mut session, 9);
        assert!(!session.submit_answer("100"));

        let Advance::Finished(record) = session.advance() else {
            panic!("expected history record");
        };
        assert!(session.is_finished());
        assert_eq!(session.state().phase(), SessionPhase::Finished);
        assert_eq!(record.attempts.len(), session.state().attempt_log.len());
        assert_eq!(record.total_questions, 10);
        assert_eq!(record.score, 1);
        assert_eq!(record.timestamp, fixed_now());

        assert_eq!(session.advance(), Advance::AlreadyFinished);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn score_is_monotonic_and_bounded() {
        let mut session = two_question_session();
        let mut last_score = 0;
        let guesses = [["Venus", "Mercury", "Mercury"], ["41", "40", "40"]];
        for round in guesses {
            for guess in round {
                session.submit_answer(guess);
                let score = session.state().score;
                assert!(score >= last_score);
                assert!(usize::try_from(score).unwrap() <= session.total_questions());
                last_score = score;
            }
            session.advance();
        }
        assert_eq!(last_score, 2);
    }

    #[test]
    fn restart_from_any_state_yields_initial_state() {
        let initial = SessionState::initial(30);

        let mut fresh = reference_session();
        fresh.restart();
        assert_eq!(fresh.state(), &initial);
        fresh.restart();
        assert_eq!(fresh.state(), &initial);

        let mut mid = reference_session();
        mid.submit_answer("Venus");
        mid.tick();
        mid.advance();
        mid.restart();
        assert_eq!(mid.state(), &initial);

        let mut done = two_question_session();
        done.advance();
        done.advance();
        assert!(done.is_finished());
        done.restart();
        assert_eq!(done.state(), &initial);
        assert_eq!(done.current_question().unwrap().text(), "Which planet is closest to the Sun?");
    }

    #[test]
    fn advance_and_restart_bump_ticket() {
        let mut session = reference_session();
        let t0 = session.ticket();
        session.submit_answer("Venus");
        session.tick();
        assert_eq!(session.ticket(), t0);

        session.advance();
        let t1 = session.ticket();
        assert_ne!(t0, t1);

        session.restart();
        assert_ne!(session.ticket(), t1);
    }

    #[test]
    fn custom_seconds_apply_after_reset() {
        let config = SessionConfig::new(3).unwrap();
        let mut session = QuizSession::new(QuestionBank::reference(), config, fixed_clock());
        assert_eq!(session.state().seconds_remaining, 3);
        session.tick();
        session.tick();
        assert_eq!(session.tick(), Tick::TimedOut(Advance::Next(1)));
        assert_eq!(session.state().seconds_remaining, 3);
        assert_eq!(SessionConfig::new(0).unwrap_err(), ConfigError::ZeroSeconds);
    }

    #[test]
    fn snapshot_tracks_state() {
        let mut session = two_question_session();
        session.submit_answer("venus");
        let snap = session.snapshot();
        assert_eq!(snap.state, *session.state());
        assert_eq!(snap.total_questions, 2);
        assert_eq!(
            snap.question.as_ref().map(Question::text),
            Some("Which planet is closest to the Sun?")
        );

        session.advance();
        session.advance();
        assert!(session.snapshot().question.is_none());
    }
}
