use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Attempt;
use crate::time::iso8601;

/// Durable summary of one completed quiz run, handed to the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub attempts: Vec<Attempt>,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        score: u32,
        total_questions: u32,
        attempts: Vec<Attempt>,
    ) -> Self {
        Self {
            timestamp,
            score,
            total_questions,
            attempts,
        }
    }

    /// ISO-8601 rendering of `timestamp`.
    #[must_use]
    pub fn timestamp_iso(&self) -> String {
        iso8601(self.timestamp)
    }

    #[must_use]
    pub fn correct_attempts(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_correct).count()
    }
}
