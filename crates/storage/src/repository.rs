use async_trait::async_trait;
use lms_core::model::{QuizResultRecord, Session};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Client-local record of who is logged in.
///
/// A missing entry means "not logged in", never an error.
#[async_trait]
pub trait LoginRepository: Send + Sync {
    /// Load the stored login, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load_session(&self) -> Result<Option<Session>, StorageError>;

    /// Store the login, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the login cannot be stored.
    async fn save_session(&self, session: &Session) -> Result<(), StorageError>;

    /// Forget the stored login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

/// Best-effort local cache of submitted quiz results.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Append a result and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, record: &QuizResultRecord) -> Result<i64, StorageError>;

    /// Most recent results first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cache cannot be read.
    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResultRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    session: Arc<Mutex<Option<Session>>>,
    quiz_results: Arc<Mutex<Vec<QuizResultRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<Session>, StorageError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_result(&self, record: &QuizResultRecord) -> Result<i64, StorageError> {
        let mut guard = self
            .quiz_results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        i64::try_from(guard.len()).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResultRecord>, StorageError> {
        let guard = self
            .quiz_results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Aggregates the client-local repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub login: Arc<dyn LoginRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let login: Arc<dyn LoginRepository> = Arc::new(repo.clone());
        let quiz_results: Arc<dyn QuizResultRepository> = Arc::new(repo);
        Self {
            login,
            quiz_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{CourseId, UserId};
    use lms_core::time::fixed_now;

    fn record(title: &str, marks: u32) -> QuizResultRecord {
        QuizResultRecord {
            course_id: CourseId::new("c1"),
            course_title: "Course".into(),
            sublesson_title: title.into(),
            marks,
            total_marks: 3,
            timestamp: fixed_now(),
        }
    }

    #[tokio::test]
    async fn absent_login_is_none() {
        let storage = Storage::in_memory();
        assert!(storage.login.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_save_then_clear() {
        let storage = Storage::in_memory();
        let session = Session::new(UserId::new("u1"), "tok");
        storage.login.save_session(&session).await.unwrap();
        assert_eq!(storage.login.load_session().await.unwrap(), Some(session));
        storage.login.clear_session().await.unwrap();
        assert!(storage.login.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn quiz_results_list_newest_first() {
        let repo = InMemoryRepository::new();
        repo.append_result(&record("first", 1)).await.unwrap();
        repo.append_result(&record("second", 3)).await.unwrap();
        let listed = repo.list_results(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].sublesson_title, "second");
        assert_eq!(repo.list_results(1).await.unwrap().len(), 1);
    }
}
