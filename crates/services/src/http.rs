use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use lms_core::model::{Attachment, CourseId, UserId};

use crate::api::LmsApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError};
use crate::wire::{
    CourseDto, CreateTaskRequest, ProgressResponseDto, ProgressUpdateRequest,
    SubmitAnswersRequest, TaskDto, UploadResponseDto, UserDto,
};

/// `LmsApi` over the backend's JSON REST endpoints.
#[derive(Clone)]
pub struct HttpLmsApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpLmsApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = Some(token).filter(|token| !token.trim().is_empty());
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_value(&self, url: Url) -> Result<Value, ApiError> {
        debug!("GET {url}");
        let response = self.authorized(self.client.get(url)).send().await?;
        read_json(response).await
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Option<Vec<T>>, ApiError> {
        match self.get_value(url).await? {
            Value::Array(items) => Ok(Some(
                items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<_, _>>()?,
            )),
            _ => Ok(None),
        }
    }

    async fn post_json<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<Value, ApiError> {
        debug!("POST {url}");
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body).ok().and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        });
        return Err(ApiError::HttpStatus { status, message });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl LmsApi for HttpLmsApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        let tasks = self.get_list(self.endpoint(&["tasks"])?).await?;
        Ok(tasks.unwrap_or_else(|| {
            warn!("task list response was not a list; treating as empty");
            Vec::new()
        }))
    }

    async fn list_users(&self) -> Result<Vec<UserDto>, ApiError> {
        let users = self.get_list(self.endpoint(&["users"])?).await?;
        Ok(users.unwrap_or_else(|| {
            warn!("user list response was not a list; treating as empty");
            Vec::new()
        }))
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<TaskDto, ApiError> {
        let created = self.post_json(self.endpoint(&["tasks"])?, request).await?;
        Ok(serde_json::from_value(created)?)
    }

    async fn upload_task_file(
        &self,
        attachment: &Attachment,
    ) -> Result<UploadResponseDto, ApiError> {
        let url = self.endpoint(&["tasks", "upload"])?;
        debug!("POST {url} ({} bytes)", attachment.size_bytes());
        let part = Part::bytes(attachment.bytes().to_vec())
            .file_name(attachment.file_name().to_owned())
            .mime_str(attachment.content_type())?;
        let response = self
            .authorized(self.client.post(url))
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        match read_json(response).await? {
            Value::Null => Ok(UploadResponseDto::default()),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    async fn list_user_tasks(&self, user_id: &UserId) -> Result<Vec<TaskDto>, ApiError> {
        let url = self.endpoint(&["tasks", "user", user_id.as_str()])?;
        self.get_list(url).await?.ok_or(ApiError::InvalidResponse)
    }

    async fn get_course(&self, course_id: &CourseId) -> Result<Option<CourseDto>, ApiError> {
        match self.get_value(self.endpoint(&["courses", course_id.as_str()])?).await? {
            Value::Null => Ok(None),
            body => Ok(Some(serde_json::from_value(body)?)),
        }
    }

    async fn get_course_progress(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<ProgressResponseDto, ApiError> {
        let url = self.endpoint(&["progress", user_id.as_str(), course_id.as_str()])?;
        match self.get_value(url).await? {
            Value::Null => Ok(ProgressResponseDto::default()),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    async fn record_course_progress(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        update: &ProgressUpdateRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["progress", user_id.as_str(), course_id.as_str()])?;
        self.post_json(url, update).await?;
        Ok(())
    }

    async fn submit_answers(
        &self,
        course_id: &CourseId,
        sublesson_index: usize,
        request: &SubmitAnswersRequest,
    ) -> Result<(), ApiError> {
        let index = sublesson_index.to_string();
        let url = self.endpoint(&["courses", course_id.as_str(), "sublessons", &index, "answers"])?;
        self.post_json(url, request).await?;
        Ok(())
    }
}
