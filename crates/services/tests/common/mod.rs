#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use lms_core::model::{Attachment, CourseId, UserId};
use services::ApiError;
use services::LmsApi;
use services::wire::{
    CourseDto, CreateTaskRequest, ProgressResponseDto, ProgressUpdateRequest,
    SubmitAnswersRequest, TaskDto, UploadResponseDto, UserDto,
};

/// Requests seen by `FakeApi`, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTasks,
    ListUsers,
    CreateTask(CreateTaskRequest),
    Upload(String),
    ListUserTasks(String),
    GetCourse(String),
    GetProgress(String, String),
    RecordProgress(String, ProgressUpdateRequest),
    SubmitAnswers(String, usize, SubmitAnswersRequest),
}

/// Scripted in-memory backend.
#[derive(Default)]
pub struct FakeApi {
    pub tasks: Vec<TaskDto>,
    pub users: Vec<UserDto>,
    pub course: Option<CourseDto>,
    pub progress: ProgressResponseDto,
    /// `None` makes the user task list answer with a non-list body.
    pub user_tasks: Option<Vec<TaskDto>>,
    pub upload: Option<UploadResponseDto>,
    pub fail_tasks: bool,
    pub fail_users: bool,
    pub fail_create: bool,
    pub fail_progress: bool,
    pub fail_writes: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn server_error() -> ApiError {
    ApiError::HttpStatus {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: Some("boom".into()),
    }
}

pub fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl LmsApi for FakeApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        self.record(Call::ListTasks);
        if self.fail_tasks {
            return Err(server_error());
        }
        Ok(self.tasks.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserDto>, ApiError> {
        self.record(Call::ListUsers);
        if self.fail_users {
            return Err(server_error());
        }
        Ok(self.users.clone())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<TaskDto, ApiError> {
        self.record(Call::CreateTask(request.clone()));
        if self.fail_create {
            return Err(server_error());
        }
        Ok(TaskDto {
            id: Some("created".into()),
            title: Some(request.title.clone()),
            description: Some(request.description.clone()),
            due_date: Some(request.due_date.clone()),
            assigned_to: serde_json::to_value(&request.assigned_to).unwrap(),
            file: request.file.clone(),
            my_submission: None,
        })
    }

    async fn upload_task_file(
        &self,
        attachment: &Attachment,
    ) -> Result<UploadResponseDto, ApiError> {
        self.record(Call::Upload(attachment.file_name().to_owned()));
        self.upload.clone().ok_or_else(server_error)
    }

    async fn list_user_tasks(&self, user_id: &UserId) -> Result<Vec<TaskDto>, ApiError> {
        self.record(Call::ListUserTasks(user_id.to_string()));
        self.user_tasks.clone().ok_or(ApiError::InvalidResponse)
    }

    async fn get_course(&self, course_id: &CourseId) -> Result<Option<CourseDto>, ApiError> {
        self.record(Call::GetCourse(course_id.to_string()));
        Ok(self.course.clone())
    }

    async fn get_course_progress(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<ProgressResponseDto, ApiError> {
        self.record(Call::GetProgress(user_id.to_string(), course_id.to_string()));
        if self.fail_progress {
            return Err(server_error());
        }
        Ok(self.progress.clone())
    }

    async fn record_course_progress(
        &self,
        _user_id: &UserId,
        course_id: &CourseId,
        update: &ProgressUpdateRequest,
    ) -> Result<(), ApiError> {
        self.record(Call::RecordProgress(course_id.to_string(), *update));
        if self.fail_writes {
            return Err(server_error());
        }
        Ok(())
    }

    async fn submit_answers(
        &self,
        course_id: &CourseId,
        sublesson_index: usize,
        request: &SubmitAnswersRequest,
    ) -> Result<(), ApiError> {
        self.record(Call::SubmitAnswers(
            course_id.to_string(),
            sublesson_index,
            request.clone(),
        ));
        if self.fail_writes {
            return Err(server_error());
        }
        Ok(())
    }
}
