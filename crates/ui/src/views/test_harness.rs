use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use serde_json::Value;

use lms_core::model::{Attachment, CourseId, Session, UserId};
use lms_core::time::fixed_clock;
use services::wire::{
    CourseDto, CreateTaskRequest, ProgressResponseDto, ProgressUpdateRequest,
    SubmitAnswersRequest, TaskDto, UploadResponseDto, UserDto,
};
use services::{
    AdminTaskService, ApiError, AppServices, CourseViewerService, LmsApi, StudentTaskService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{AdminTaskView, CourseContentView, HomeView, UserTaskView};

/// Backend answering from JSON fixtures; a `None` list fails the request.
#[derive(Default)]
pub struct FixtureApi {
    pub tasks: Option<Value>,
    pub users: Option<Value>,
    pub user_tasks: Option<Value>,
    pub course: Option<Value>,
}

fn decode<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Result<T, ApiError> {
    let value = value.ok_or(ApiError::InvalidResponse)?;
    Ok(serde_json::from_value(value.clone())?)
}

#[async_trait]
impl LmsApi for FixtureApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        decode(self.tasks.as_ref())
    }

    async fn list_users(&self) -> Result<Vec<UserDto>, ApiError> {
        decode(self.users.as_ref())
    }

    async fn create_task(&self, _request: &CreateTaskRequest) -> Result<TaskDto, ApiError> {
        Err(ApiError::InvalidResponse)
    }

    async fn upload_task_file(
        &self,
        _attachment: &Attachment,
    ) -> Result<UploadResponseDto, ApiError> {
        Err(ApiError::InvalidResponse)
    }

    async fn list_user_tasks(&self, _user_id: &UserId) -> Result<Vec<TaskDto>, ApiError> {
        decode(self.user_tasks.as_ref())
    }

    async fn get_course(&self, _course_id: &CourseId) -> Result<Option<CourseDto>, ApiError> {
        match self.course.as_ref() {
            Some(value) => decode(Some(value)).map(Some),
            None => Ok(None),
        }
    }

    async fn get_course_progress(
        &self,
        _user_id: &UserId,
        _course_id: &CourseId,
    ) -> Result<ProgressResponseDto, ApiError> {
        Ok(ProgressResponseDto::default())
    }

    async fn record_course_progress(
        &self,
        _user_id: &UserId,
        _course_id: &CourseId,
        _update: &ProgressUpdateRequest,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn submit_answers(
        &self,
        _course_id: &CourseId,
        _sublesson_index: usize,
        _request: &SubmitAnswersRequest,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Option<Session> {
        self.services.session().cloned()
    }

    fn admin_tasks(&self) -> Arc<AdminTaskService> {
        self.services.admin_tasks()
    }

    fn course_viewer(&self) -> Arc<CourseViewerService> {
        self.services.course_viewer()
    }

    fn student_tasks(&self) -> Arc<StudentTaskService> {
        self.services.student_tasks()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    AdminTasks,
    UserTasks,
    Course(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::AdminTasks => rsx! { AdminTaskView {} },
        ViewKind::UserTasks => rsx! { UserTaskView {} },
        ViewKind::Course(course_id) => rsx! { CourseContentView { course_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuilds and lets pending loads finish.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn student() -> Session {
    Session::new(UserId::new("u1"), "token-1")
}

pub fn setup_view_harness(view: ViewKind, api: FixtureApi, session: Option<Session>) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_parts(Arc::new(api), &storage, fixed_clock(), session);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );
    ViewHarness { dom }
}
