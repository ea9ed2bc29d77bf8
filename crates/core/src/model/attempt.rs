use serde::{Deserialize, Serialize};

/// Answer text recorded when a question times out without any guess.
pub const NO_ANSWER: &str = "No Answer";

/// One recorded guess against a question, either submitted or synthesized on timeout.
///
/// `selected_answer` keeps the raw text as given; only the comparison is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub question_index: usize,
    pub question_text: String,
    pub selected_answer: String,
    pub is_correct: bool,
    /// 1-based, counted per question.
    pub attempt_number: u32,
}

impl Attempt {
    #[must_use]
    pub fn new(
        question_index: usize,
        question_text: impl Into<String>,
        selected_answer: impl Into<String>,
        is_correct: bool,
        attempt_number: u32,
    ) -> Self {
        Self {
            question_index,
            question_text: question_text.into(),
            selected_answer: selected_answer.into(),
            is_correct,
            attempt_number,
        }
    }

    /// The synthetic attempt logged when the countdown runs out.
    #[must_use]
    pub fn timed_out(question_index: usize, question_text: impl Into<String>) -> Self {
        Self::new(question_index, question_text, NO_ANSWER, false, 1)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        !self.is_correct && self.selected_answer == NO_ANSWER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_out_attempt_is_first_and_incorrect() {
        let a = Attempt::timed_out(3, "Q");
        assert_eq!(a.attempt_number, 1);
        assert!(!a.is_correct);
        assert!(a.is_timeout());
        assert_eq!(a.selected_answer, NO_ANSWER);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let a = Attempt::new(0, "Q", "A", true, 1);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["questionIndex"], 0);
        assert_eq!(json["selectedAnswer"], "A");
        assert_eq!(json["isCorrect"], true);
        assert_eq!(json["attemptNumber"], 1);
    }
}
