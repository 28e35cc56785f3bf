//! Shared error types for the services crate.

use thiserror::Error;

use lms_core::model::TaskValidationErrors;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while reading API configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL {0:?} cannot carry a path")]
    CannotBeABase(String),
    #[error("invalid request timeout {0:?}; expected whole seconds")]
    InvalidTimeout(String),
}

/// Errors emitted by the HTTP adapter and any other `LmsApi` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("{}", status_message(*.status, .message.as_deref()))]
    HttpStatus {
        status: reqwest::StatusCode,
        message: Option<String>,
    },
    #[error("Invalid response format from server")]
    InvalidResponse,
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn status_message(status: reqwest::StatusCode, message: Option<&str>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => message.to_owned(),
        _ => format!("request failed with status {status}"),
    }
}

/// Screen-level load failures, worded for display.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("Please log in to access this course")]
    CourseLoginRequired,
    #[error("Please log in to view tasks")]
    TasksLoginRequired,
    #[error("Course ID is required")]
    MissingCourseId,
    #[error("User ID is missing")]
    MissingUserId,
    #[error("Course not found")]
    CourseNotFound,
    #[error("No content available for this course")]
    NoContent,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AdminTaskService::create_task`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CreateTaskError {
    #[error(transparent)]
    Validation(#[from] TaskValidationErrors),
    #[error("Failed to create task: {0}")]
    Api(#[from] ApiError),
}

impl CreateTaskError {
    /// One entry per message to show; validation yields one per failing field.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.messages(),
            Self::Api(_) => vec![self.to_string()],
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
