use chrono::{DateTime, Utc};
use lms_core::model::{CourseId, QuizResultRecord};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} out of range")))
}

pub(crate) fn map_quiz_result_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<QuizResultRecord, StorageError> {
    let recorded_at: String = row.try_get("recorded_at").map_err(ser)?;
    let timestamp = DateTime::parse_from_rfc3339(&recorded_at)
        .map_err(ser)?
        .with_timezone(&Utc);

    Ok(QuizResultRecord {
        course_id: CourseId::new(row.try_get::<String, _>("course_id").map_err(ser)?),
        course_title: row.try_get("course_title").map_err(ser)?,
        sublesson_title: row.try_get("sublesson_title").map_err(ser)?,
        marks: i64_to_u32("marks", row.try_get("marks").map_err(ser)?)?,
        total_marks: i64_to_u32("total_marks", row.try_get("total_marks").map_err(ser)?)?,
        timestamp,
    })
}
