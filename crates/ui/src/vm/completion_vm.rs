use quiz_core::QuizSnapshot;
use quiz_core::model::Attempt;

use super::quiz_vm::score_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub question_text: String,
    pub attempt_number: u32,
    pub selected_answer: String,
    pub result_label: &'static str,
    pub is_correct: bool,
    /// The countdown ran out before any guess.
    pub timed_out: bool,
}

impl From<&Attempt> for AttemptRowVm {
    fn from(attempt: &Attempt) -> Self {
        Self {
            question_text: attempt.question_text.clone(),
            attempt_number: attempt.attempt_number,
            selected_answer: attempt.selected_answer.clone(),
            result_label: if attempt.is_correct {
                "✔ Correct"
            } else {
                "✖ Incorrect"
            },
            is_correct: attempt.is_correct,
            timed_out: attempt.is_timeout(),
        }
    }
}

#[must_use]
pub fn map_attempt_rows(attempts: &[Attempt]) -> Vec<AttemptRowVm> {
    attempts.iter().map(AttemptRowVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub score_label: String,
    pub rows: Vec<AttemptRowVm>,
}

impl CompletionVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        Self {
            score_label: score_label(snapshot.state.score, snapshot.total_questions),
            rows: map_attempt_rows(&snapshot.state.attempt_log),
        }
    }
}
