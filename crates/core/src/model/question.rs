use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("correct answer cannot be empty")]
    EmptyAnswer,

    #[error("multiple-choice question needs at least one option")]
    NoOptions,

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── ANSWER NORMALIZATION ─────────────────────────────────────────────────────
//

/// Trims surrounding whitespace and lower-cases an answer for comparison.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed equality.
#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// How the user answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    FreeText,
}

/// Serialized shape of a question, as found in question bank files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or answer is blank, or if the options
    /// are empty, contain a blank entry, or do not include the correct answer.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        if let Some(options) = &self.options {
            if options.is_empty() {
                return Err(QuestionError::NoOptions);
            }
            if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
                return Err(QuestionError::EmptyOption { index });
            }
            if !options.iter().any(|o| answers_match(o, &self.correct_answer)) {
                return Err(QuestionError::AnswerNotInOptions {
                    answer: self.correct_answer,
                });
            }
        }

        Ok(Question {
            text: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

/// An immutable quiz question. `options == None` marks a free-text question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct Question {
    text: String,
    options: Option<Vec<String>>,
    correct_answer: String,
}

impl Question {
    /// Builds a multiple-choice question.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn choice<I, S>(
        text: impl Into<String>,
        options: I,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QuestionDraft {
            question: text.into(),
            options: Some(options.into_iter().map(Into::into).collect()),
            correct_answer: correct_answer.into(),
        }
        .validate()
    }

    /// Builds a free-text question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or answer is blank.
    pub fn free_text(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            question: text.into(),
            options: None,
            correct_answer: correct_answer.into(),
        }
        .validate()
    }

    /// Builds a question from data already known to be valid (the built-in bank).
    pub(crate) fn from_static(
        text: &str,
        options: Option<&[&str]>,
        correct_answer: &str,
    ) -> Self {
        Self {
            text: text.to_owned(),
            options: options.map(|o| o.iter().map(|s| (*s).to_owned()).collect()),
            correct_answer: correct_answer.to_owned(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        if self.options.is_some() {
            QuestionKind::MultipleChoice
        } else {
            QuestionKind::FreeText
        }
    }

    #[must_use]
    pub fn is_correct(&self, given: &str) -> bool {
        answers_match(given, &self.correct_answer)
    }
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<Question> for QuestionDraft {
    fn from(q: Question) -> Self {
        Self {
            question: q.text,
            options: q.options,
            correct_answer: q.correct_answer,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_answer("  MeRcUry \n"), "mercury");
        assert!(answers_match(" 40 ", "40"));
        assert!(answers_match("mercury", "Mercury"));
        assert!(!answers_match("4 0", "40"));
    }

    #[test]
    fn choice_requires_correct_answer_among_options() {
        let err = Question::choice("Pick", ["a", "b"], "c").unwrap_err();
        assert!(matches!(err, QuestionError::AnswerNotInOptions { .. }));

        let ok = Question::choice("Pick", ["Alpha", "Beta"], "beta ").unwrap();
        assert_eq!(ok.kind(), QuestionKind::MultipleChoice);
        assert!(ok.is_correct("BETA"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            Question::free_text("  ", "x").unwrap_err(),
            QuestionError::EmptyText
        );
        assert_eq!(
            Question::free_text("Q", " ").unwrap_err(),
            QuestionError::EmptyAnswer
        );
        assert_eq!(
            Question::choice("Q", Vec::<String>::new(), "x").unwrap_err(),
            QuestionError::NoOptions
        );
        assert_eq!(
            Question::choice("Q", ["x", " "], "x").unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
    }

    #[test]
    fn deserializes_original_bank_shape() {
        let json = r#"{"question":"2+2?","correctAnswer":"4"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind(), QuestionKind::FreeText);
        assert_eq!(q.text(), "2+2?");

        let bad = r#"{"question":"Pick","options":["a"],"correctAnswer":"b"}"#;
        assert!(serde_json::from_str::<Question>(bad).is_err());
    }
}
