use std::sync::Arc;

use log::{info, warn};

use lms_core::model::{Task, TaskDraft, User};

use crate::api::LmsApi;
use crate::error::CreateTaskError;
use crate::wire::{CreateTaskRequest, normalize_task, normalize_user};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch tasks or users";
pub const UPLOAD_WITHOUT_URL_MESSAGE: &str =
    "File uploaded but no file URL returned. Task will be created without a file.";
pub const UPLOAD_FAILED_MESSAGE: &str =
    "Failed to upload PDF file. Task will be created without a file.";

/// What the admin screen shows after loading; partial on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminTaskData {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    /// One entry per failed request.
    pub messages: Vec<String>,
}

/// A created task plus any non-fatal problems met on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    pub task: Task,
    pub warnings: Vec<String>,
}

/// Loads and creates tasks for the admin dashboard.
#[derive(Clone)]
pub struct AdminTaskService {
    api: Arc<dyn LmsApi>,
}

impl AdminTaskService {
    #[must_use]
    pub fn new(api: Arc<dyn LmsApi>) -> Self {
        Self { api }
    }

    /// Fetches tasks and users independently; a failure of one keeps the other.
    pub async fn load(&self) -> AdminTaskData {
        let mut data = AdminTaskData::default();

        match self.api.list_tasks().await {
            Ok(tasks) => data.tasks = tasks.into_iter().map(normalize_task).collect(),
            Err(err) => {
                warn!("failed to fetch tasks: {err}");
                data.messages.push(format!("{FETCH_FAILED_MESSAGE}: {err}"));
            }
        }
        match self.api.list_users().await {
            Ok(users) => data.users = users.into_iter().map(normalize_user).collect(),
            Err(err) => {
                warn!("failed to fetch users: {err}");
                data.messages.push(format!("{FETCH_FAILED_MESSAGE}: {err}"));
            }
        }

        data
    }

    /// Validates the draft, uploads its attachment if any, then creates the task.
    ///
    /// An upload that fails or returns no URL degrades to a task without a file
    /// and is reported through `CreatedTask::warnings`.
    ///
    /// # Errors
    ///
    /// Returns `CreateTaskError::Validation` before any network call, or
    /// `CreateTaskError::Api` when the create call itself fails.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<CreatedTask, CreateTaskError> {
        let new_task = draft.validate()?;
        let mut warnings = Vec::new();

        let file = match draft.attachment() {
            None => None,
            Some(attachment) => match self.api.upload_task_file(attachment).await {
                Ok(uploaded) => {
                    let url = uploaded.file_url().map(str::to_owned);
                    if url.is_none() {
                        warn!("upload of {} returned no file URL", attachment.file_name());
                        warnings.push(UPLOAD_WITHOUT_URL_MESSAGE.to_owned());
                    }
                    url
                }
                Err(err) => {
                    warn!("upload of {} failed: {err}", attachment.file_name());
                    warnings.push(UPLOAD_FAILED_MESSAGE.to_owned());
                    None
                }
            },
        };

        let request = CreateTaskRequest::new(&new_task, file);
        let created = self.api.create_task(&request).await?;
        let task = normalize_task(created);
        info!("created task {:?}", task.title);
        Ok(CreatedTask { task, warnings })
    }
}
