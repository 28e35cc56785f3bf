use async_trait::async_trait;
use lms_core::model::{Session, UserId};
use sqlx::Row;

use crate::repository::{LoginRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{conn, ser};

#[async_trait]
impl LoginRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query("SELECT user_id, token FROM login WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row.try_get("user_id").map_err(ser)?;
        let token: String = row.try_get("token").map_err(ser)?;
        Ok(Some(Session::new(UserId::new(user_id), token)))
    }

    async fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO login (id, user_id, token)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                token = excluded.token
            ",
        )
        .bind(session.user_id().as_str())
        .bind(session.token())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM login WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
