use async_trait::async_trait;
use lms_core::model::QuizResultRecord;

use crate::repository::{QuizResultRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{conn, map_quiz_result_row};

#[async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn append_result(&self, record: &QuizResultRecord) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO quiz_results (
                course_id,
                course_title,
                sublesson_title,
                marks,
                total_marks,
                recorded_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.course_id.as_str())
        .bind(record.course_title.as_str())
        .bind(record.sublesson_title.as_str())
        .bind(i64::from(record.marks))
        .bind(i64::from(record.total_marks))
        .bind(record.timestamp.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(result.last_insert_rowid())
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResultRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                course_id,
                course_title,
                sublesson_title,
                marks,
                total_marks,
                recorded_at
            FROM quiz_results
            ORDER BY recorded_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_quiz_result_row).collect()
    }
}
