mod attempt;
pub mod bank;
mod history;
mod ids;
mod question;

pub use attempt::{Attempt, NO_ANSWER};
pub use bank::{BankError, QuestionBank, reference_questions};
pub use history::HistoryRecord;
pub use ids::{HistoryId, ParseIdError};
pub use question::{
    Question, QuestionDraft, QuestionError, QuestionKind, answers_match, normalize_answer,
};
