mod completion_vm;
mod quiz_vm;

pub use completion_vm::{AttemptRowVm, CompletionVm, map_attempt_rows};
pub use quiz_vm::{
    AnswerMode, FeedbackVm, NavButton, QuizIntent, QuizVm, can_submit, score_label, timer_label,
};
