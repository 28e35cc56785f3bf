#![forbid(unsafe_code)]

pub mod admin_tasks;
pub mod api;
pub mod app_services;
pub mod config;
pub mod course_viewer;
pub mod error;
pub mod http;
pub mod student_tasks;
pub mod wire;

pub use lms_core::Clock;

pub use admin_tasks::{AdminTaskData, AdminTaskService, CreatedTask};
pub use api::LmsApi;
pub use app_services::AppServices;
pub use config::ApiConfig;
pub use course_viewer::CourseViewerService;
pub use error::{ApiError, AppServicesError, ConfigError, CreateTaskError, LoadError};
pub use http::HttpLmsApi;
pub use student_tasks::StudentTaskService;
