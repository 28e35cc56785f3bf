use std::sync::Arc;

use log::info;

use lms_core::model::Session;
use storage::repository::Storage;

use crate::Clock;
use crate::admin_tasks::AdminTaskService;
use crate::api::LmsApi;
use crate::config::ApiConfig;
use crate::course_viewer::CourseViewerService;
use crate::error::AppServicesError;
use crate::http::HttpLmsApi;
use crate::student_tasks::StudentTaskService;

/// Resolves the login and assembles the dashboard services around one API client.
#[derive(Clone)]
pub struct AppServices {
    session: Option<Session>,
    admin_tasks: Arc<AdminTaskService>,
    course_viewer: Arc<CourseViewerService>,
    student_tasks: Arc<StudentTaskService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// A `login` given here replaces the stored one; otherwise the stored login is used.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, login lookup, or
    /// HTTP client construction fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: &ApiConfig,
        clock: Clock,
        login: Option<Session>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::with_storage(&storage, config, clock, login).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if login lookup or HTTP client construction fails.
    pub async fn with_storage(
        storage: &Storage,
        config: &ApiConfig,
        clock: Clock,
        login: Option<Session>,
    ) -> Result<Self, AppServicesError> {
        let session = resolve_session(storage, login).await?;
        let mut api = HttpLmsApi::new(config)?;
        if let Some(session) = &session {
            api = api.with_token(session.token());
        }
        info!(
            "using backend {} as {}",
            config.base_url,
            session
                .as_ref()
                .map_or_else(|| "anonymous".to_owned(), |s| s.user_id().to_string())
        );
        Ok(Self::from_parts(Arc::new(api), storage, clock, session))
    }

    /// Wire services around any `LmsApi`, e.g. an in-memory fake.
    #[must_use]
    pub fn from_parts(
        api: Arc<dyn LmsApi>,
        storage: &Storage,
        clock: Clock,
        session: Option<Session>,
    ) -> Self {
        let admin_tasks = Arc::new(AdminTaskService::new(Arc::clone(&api)));
        let course_viewer = Arc::new(CourseViewerService::new(
            Arc::clone(&api),
            Arc::clone(&storage.quiz_results),
            clock,
            session.clone(),
        ));
        let student_tasks = Arc::new(StudentTaskService::new(api, session.clone()));
        Self {
            session,
            admin_tasks,
            course_viewer,
            student_tasks,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn admin_tasks(&self) -> Arc<AdminTaskService> {
        Arc::clone(&self.admin_tasks)
    }

    #[must_use]
    pub fn course_viewer(&self) -> Arc<CourseViewerService> {
        Arc::clone(&self.course_viewer)
    }

    #[must_use]
    pub fn student_tasks(&self) -> Arc<StudentTaskService> {
        Arc::clone(&self.student_tasks)
    }
}

async fn resolve_session(
    storage: &Storage,
    login: Option<Session>,
) -> Result<Option<Session>, AppServicesError> {
    if let Some(session) = login {
        storage.login.save_session(&session).await?;
        return Ok(Some(session));
    }
    Ok(storage.login.load_session().await?)
}
