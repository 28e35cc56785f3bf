use std::sync::Arc;

use log::{debug, warn};

use lms_core::model::{Session, Task};

use crate::api::LmsApi;
use crate::error::LoadError;
use crate::wire::normalize_task;

/// Read-only list of the logged-in user's tasks.
#[derive(Clone)]
pub struct StudentTaskService {
    api: Arc<dyn LmsApi>,
    session: Option<Session>,
}

impl StudentTaskService {
    #[must_use]
    pub fn new(api: Arc<dyn LmsApi>, session: Option<Session>) -> Self {
        Self { api, session }
    }

    /// # Errors
    ///
    /// Returns `LoadError::TasksLoginRequired` without a login,
    /// `LoadError::MissingUserId` for a login without a user id, and
    /// `LoadError::Api` when the request fails or the body is not a list.
    pub async fn load(&self) -> Result<Vec<Task>, LoadError> {
        let session = self
            .session
            .as_ref()
            .filter(|session| session.is_authenticated())
            .ok_or(LoadError::TasksLoginRequired)?;
        let user_id = session.user_id();
        if user_id.as_str().trim().is_empty() {
            return Err(LoadError::MissingUserId);
        }

        let tasks = self.api.list_user_tasks(user_id).await.map_err(|err| {
            warn!("failed to fetch tasks for {user_id}: {err}");
            LoadError::from(err)
        })?;
        debug!("loaded {} tasks for {user_id}", tasks.len());
        Ok(tasks.into_iter().map(normalize_task).collect())
    }
}
