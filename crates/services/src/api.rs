use async_trait::async_trait;

use lms_core::model::{Attachment, CourseId, UserId};

use crate::error::ApiError;
use crate::wire::{
    CourseDto, CreateTaskRequest, ProgressResponseDto, ProgressUpdateRequest,
    SubmitAnswersRequest, TaskDto, UploadResponseDto, UserDto,
};

/// The LMS backend as seen by the dashboards.
///
/// `HttpLmsApi` is the production adapter; tests substitute in-memory fakes.
#[async_trait]
pub trait LmsApi: Send + Sync {
    /// Every task, for the admin list. A non-list body yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failures.
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError>;

    /// Assignable users. A non-list body yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failures.
    async fn list_users(&self) -> Result<Vec<UserDto>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` when the backend rejects the task.
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<TaskDto, ApiError>;

    /// Uploads a task attachment as multipart field `file`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the upload fails.
    async fn upload_task_file(&self, attachment: &Attachment)
    -> Result<UploadResponseDto, ApiError>;

    /// Tasks assigned to one user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidResponse` when the body is not a list.
    async fn list_user_tasks(&self, user_id: &UserId) -> Result<Vec<TaskDto>, ApiError>;

    /// `Ok(None)` when the backend answers with an empty body or `null`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for a 404 and other `ApiError`s on failure.
    async fn get_course(&self, course_id: &CourseId) -> Result<Option<CourseDto>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failures.
    async fn get_course_progress(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<ProgressResponseDto, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failures.
    async fn record_course_progress(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        update: &ProgressUpdateRequest,
    ) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failures.
    async fn submit_answers(
        &self,
        course_id: &CourseId,
        sublesson_index: usize,
        request: &SubmitAnswersRequest,
    ) -> Result<(), ApiError>;
}
