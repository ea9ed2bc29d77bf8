//! The fixed, ordered set of questions a quiz run walks through.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{Question, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("invalid question bank json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// A non-empty, immutable sequence of questions. Cloning shares the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are given.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Parses a JSON array of `{ "question", "options"?, "correctAnswer" }` objects.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Json` for malformed json, `BankError::InvalidQuestion`
    /// for the first entry that fails validation, and `BankError::Empty` for `[]`.
    pub fn from_json_str(raw: &str) -> Result<Self, BankError> {
        let drafts: Vec<crate::model::QuestionDraft> = serde_json::from_str(raw)?;
        let mut questions = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            let question = draft
                .validate()
                .map_err(|source| BankError::InvalidQuestion { index, source })?;
            questions.push(question);
        }
        Self::from_questions(questions)
    }

    /// The built-in ten-question bank.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            questions: reference_questions().into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// The reference question data: five multiple-choice, then five free-text questions.
#[must_use]
pub fn reference_questions() -> Vec<Question> {
    vec![
        Question::from_static(
            "Which planet is closest to the Sun?",
            Some(&["Venus", "Mercury", "Earth", "Mars"]),
            "Mercury",
        ),
        Question::from_static(
            "Which data structure organizes items in a First-In, First-Out (FIFO) manner?",
            Some(&["Stack", "Queue", "Tree", "Graph"]),
            "Queue",
        ),
        Question::from_static(
            "Which of the following is primarily used for structuring web pages?",
            Some(&["Python", "Java", "HTML", "C++"]),
            "HTML",
        ),
        Question::from_static(
            "Which chemical symbol stands for Gold?",
            Some(&["Au", "Gd", "Ag", "Pt"]),
            "Au",
        ),
        Question::from_static(
            "Which of these processes is not typically involved in refining petroleum?",
            Some(&[
                "Fractional distillation",
                "Cracking",
                "Polymerization",
                "Filtration",
            ]),
            "Filtration",
        ),
        Question::from_static("What is the value of 12 + 28?", None, "40"),
        Question::from_static("How many states are there in the United States?", None, "50"),
        Question::from_static(
            "In which year was the Declaration of Independence signed?",
            None,
            "1776",
        ),
        Question::from_static(
            "What is the value of pi rounded to the nearest integer?",
            None,
            "3",
        ),
        Question::from_static(
            "If a car travels at 60 mph for 2 hours, how many miles does it travel?",
            None,
            "120",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionKind};

    #[test]
    fn reference_bank_has_ten_valid_questions() {
        let bank = QuestionBank::reference();
        assert_eq!(bank.len(), 10);
        for q in bank.questions() {
            let revalidated = QuestionDraft::from(q.clone()).validate().unwrap();
            assert_eq!(&revalidated, q);
        }
        let choices = bank
            .questions()
            .iter()
            .filter(|q| q.kind() == QuestionKind::MultipleChoice)
            .count();
        assert_eq!(choices, 5);
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert!(matches!(
            QuestionBank::from_questions(Vec::new()),
            Err(BankError::Empty)
        ));
        assert!(matches!(
            QuestionBank::from_json_str("[]"),
            Err(BankError::Empty)
        ));
    }

    #[test]
    fn json_bank_reports_invalid_index() {
        let raw = r#"[
            {"question": "ok?", "correctAnswer": "yes"},
            {"question": "pick", "options": ["a", "b"], "correctAnswer": "c"}
        ]"#;
        let err = QuestionBank::from_json_str(raw).unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn json_bank_loads_in_order() {
        let raw = r#"[
            {"question": "first", "options": ["x", "y"], "correctAnswer": "y"},
            {"question": "second", "correctAnswer": "2"}
        ]"#;
        let bank = QuestionBank::from_json_str(raw).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(0).unwrap().text(), "first");
        assert_eq!(bank.get(1).unwrap().kind(), QuestionKind::FreeText);
    }
}
