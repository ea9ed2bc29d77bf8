use quiz_core::model::QuestionKind;
use quiz_core::{Feedback, QuizSnapshot};

/// What a view asks the runner to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Submit(String),
    Advance,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerMode {
    Choices(Vec<String>),
    FreeText,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavButton {
    /// Shown after a correct answer.
    Next,
    Skip,
}

impl NavButton {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NavButton::Next => "Next",
            NavButton::Skip => "Skip",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub text: &'static str,
    pub is_correct: bool,
}

impl From<Feedback> for FeedbackVm {
    fn from(feedback: Feedback) -> Self {
        Self {
            text: feedback.message(),
            is_correct: feedback == Feedback::Correct,
        }
    }
}

/// Everything the question screen draws, derived from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub progress_label: String,
    pub question_text: String,
    pub mode: AnswerMode,
    pub timer_label: String,
    pub feedback: Option<FeedbackVm>,
    pub score_label: String,
    pub inputs_enabled: bool,
    pub nav: NavButton,
}

impl QuizVm {
    /// `None` once the run is finished.
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Option<Self> {
        let question = snapshot.question.as_ref()?;
        let state = &snapshot.state;
        let mode = match (question.kind(), question.options()) {
            (QuestionKind::MultipleChoice, Some(options)) => AnswerMode::Choices(options.to_vec()),
            _ => AnswerMode::FreeText,
        };

        Some(Self {
            progress_label: format!(
                "Question {} of {}",
                state.current_question_index + 1,
                snapshot.total_questions
            ),
            question_text: question.text().to_string(),
            mode,
            timer_label: timer_label(state.seconds_remaining),
            feedback: state.feedback.map(FeedbackVm::from),
            score_label: score_label(state.score, snapshot.total_questions),
            inputs_enabled: !state.answered_correctly,
            nav: if state.answered_correctly {
                NavButton::Next
            } else {
                NavButton::Skip
            },
        })
    }
}

#[must_use]
pub fn timer_label(seconds: u32) -> String {
    format!("Time left: {seconds}s")
}

#[must_use]
pub fn score_label(score: u32, total: usize) -> String {
    format!("{score} / {total}")
}

/// Free-text submit stays disabled while the draft is blank.
#[must_use]
pub fn can_submit(draft: &str) -> bool {
    !draft.trim().is_empty()
}
