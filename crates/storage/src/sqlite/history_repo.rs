use quiz_core::model::{Attempt, HistoryId, HistoryRecord};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    conn, history_id_from_i64, history_id_to_i64, map_attempt_row, ser, u32_from_i64,
    usize_to_i64,
};
use crate::repository::{HistoryRepository, HistoryRow, StorageError};

impl SqliteRepository {
    async fn load_attempts(&self, history_id: i64) -> Result<Vec<Attempt>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    question_index, question_text, selected_answer,
                    is_correct, attempt_number
                FROM quiz_attempts
                WHERE history_id = ?1
                ORDER BY position ASC
            ",
        )
        .bind(history_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_attempt_row).collect()
    }

    async fn map_history_row(
        &self,
        row: &sqlx::sqlite::SqliteRow,
    ) -> Result<HistoryRow, StorageError> {
        let raw_id: i64 = row.try_get("id").map_err(ser)?;
        let timestamp = row.try_get("recorded_at").map_err(ser)?;
        let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
        let total_questions = u32_from_i64(
            "total_questions",
            row.try_get::<i64, _>("total_questions").map_err(ser)?,
        )?;
        let attempts = self.load_attempts(raw_id).await?;

        Ok(HistoryRow::new(
            history_id_from_i64(raw_id)?,
            HistoryRecord::new(timestamp, score, total_questions, attempts),
        ))
    }
}

#[async_trait::async_trait]
impl HistoryRepository for SqliteRepository {
    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryId, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query(
            r"
                INSERT INTO quiz_history (recorded_at, score, total_questions)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(record.timestamp)
        .bind(i64::from(record.score))
        .bind(i64::from(record.total_questions))
        .execute(&mut *tx)
        .await
        .map_err(conn)?;
        let history_id = res.last_insert_rowid();

        for (position, attempt) in record.attempts.iter().enumerate() {
            sqlx::query(
                r"
                    INSERT INTO quiz_attempts (
                        history_id, position, question_index, question_text,
                        selected_answer, is_correct, attempt_number
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(history_id)
            .bind(usize_to_i64("position", position)?)
            .bind(usize_to_i64("question_index", attempt.question_index)?)
            .bind(attempt.question_text.as_str())
            .bind(attempt.selected_answer.as_str())
            .bind(attempt.is_correct)
            .bind(i64::from(attempt.attempt_number))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        history_id_from_i64(history_id)
    }

    async fn get_history(&self, id: HistoryId) -> Result<HistoryRecord, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, recorded_at, score, total_questions
                FROM quiz_history
                WHERE id = ?1
            ",
        )
        .bind(history_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        Ok(self.map_history_row(&row).await?.record)
    }

    async fn list_history(&self, limit: u32) -> Result<Vec<HistoryRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, recorded_at, score, total_questions
                FROM quiz_history
                ORDER BY id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(self.map_history_row(row).await?);
        }
        Ok(out)
    }
}
