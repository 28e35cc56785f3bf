use std::sync::Arc;

use lms_core::model::Session;
use services::{AdminTaskService, CourseViewerService, StudentTaskService};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Option<Session>;

    fn admin_tasks(&self) -> Arc<AdminTaskService>;
    fn course_viewer(&self) -> Arc<CourseViewerService>;
    fn student_tasks(&self) -> Arc<StudentTaskService>;
}

#[derive(Clone)]
pub struct AppContext {
    session: Option<Session>,

    admin_tasks: Arc<AdminTaskService>,
    course_viewer: Arc<CourseViewerService>,
    student_tasks: Arc<StudentTaskService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            admin_tasks: app.admin_tasks(),
            course_viewer: app.course_viewer(),
            student_tasks: app.student_tasks(),
        }
    }

    /// The login handed in at startup; `None` means logged out.
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
