use quiz_core::model::{Attempt, HistoryId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn history_id_from_i64(v: i64) -> Result<HistoryId, StorageError> {
    u64::try_from(v)
        .map(HistoryId::new)
        .map_err(|_| StorageError::Serialization(format!("history id sign overflow: {v}")))
}

pub(crate) fn history_id_to_i64(id: HistoryId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("history id overflow".into()))
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<Attempt, StorageError> {
    let question_index: i64 = row.try_get("question_index").map_err(ser)?;
    let question_index = usize::try_from(question_index).map_err(|_| {
        StorageError::Serialization(format!("invalid question_index: {question_index}"))
    })?;
    let attempt_number = u32_from_i64(
        "attempt_number",
        row.try_get::<i64, _>("attempt_number").map_err(ser)?,
    )?;

    Ok(Attempt::new(
        question_index,
        row.try_get::<String, _>("question_text").map_err(ser)?,
        row.try_get::<String, _>("selected_answer").map_err(ser)?,
        row.try_get::<bool, _>("is_correct").map_err(ser)?,
        attempt_number,
    ))
}
