mod common;

use std::sync::Arc;

use serde_json::json;

use common::{Call, FakeApi, from_json};
use lms_core::model::{AssignmentMode, Attachment, Session, TaskDraft, UserId};
use services::admin_tasks::{UPLOAD_FAILED_MESSAGE, UPLOAD_WITHOUT_URL_MESSAGE};
use services::{AdminTaskService, CreateTaskError, LoadError, StudentTaskService};

fn draft() -> TaskDraft {
    let mut draft = TaskDraft::default();
    draft.title = " Essay ".into();
    draft.description = "Write 500 words".into();
    draft.due_date = "2025-06-01".into();
    draft
}

fn with_pdf(mut draft: TaskDraft) -> TaskDraft {
    let pdf = Attachment::new("brief.pdf", "application/pdf", vec![1, 2, 3]);
    draft.select_attachment(pdf).unwrap();
    draft
}

#[tokio::test]
async fn admin_load_keeps_partial_data_on_failure() {
    let api = Arc::new(FakeApi {
        tasks: vec![from_json(json!({ "_id": "t1", "title": "Read", "assignedTo": [] }))],
        fail_users: true,
        ..FakeApi::default()
    });
    let data = AdminTaskService::new(api).load().await;
    assert_eq!(data.tasks.len(), 1);
    assert!(data.users.is_empty());
    assert_eq!(data.messages.len(), 1);
    assert!(data.messages[0].starts_with("Failed to fetch tasks or users"));
}

#[tokio::test]
async fn invalid_draft_makes_no_request() {
    let api = Arc::new(FakeApi::default());
    let service = AdminTaskService::new(api.clone());

    let mut empty = TaskDraft::new();
    empty.mode = AssignmentMode::SpecificUsers;
    let err = service.create_task(&empty).await.unwrap_err();
    assert!(matches!(err, CreateTaskError::Validation(_)));
    assert_eq!(err.messages().len(), 4);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn create_uploads_first_and_sends_file_url() {
    let api = Arc::new(FakeApi {
        upload: Some(from_json(json!({ "data": { "fileUrl": "https://cdn/brief.pdf" } }))),
        ..FakeApi::default()
    });
    let service = AdminTaskService::new(api.clone());

    let mut draft = with_pdf(draft());
    draft.mode = AssignmentMode::SpecificUsers;
    draft.set_user_selected(&UserId::new("u1"), true);

    let created = service.create_task(&draft).await.unwrap();
    assert!(created.warnings.is_empty());
    assert_eq!(created.task.title, "Essay");
    assert_eq!(created.task.file.as_deref(), Some("https://cdn/brief.pdf"));

    let calls = api.calls();
    assert_eq!(calls[0], Call::Upload("brief.pdf".into()));
    let Call::CreateTask(request) = &calls[1] else {
        panic!("expected create call, got {:?}", calls[1]);
    };
    assert_eq!(request.assigned_to, vec![UserId::new("u1")]);
    assert_eq!(request.due_date, "2025-06-01T00:00:00+00:00");
}

#[tokio::test]
async fn failed_upload_still_creates_task_without_file() {
    let api = Arc::new(FakeApi::default());
    let service = AdminTaskService::new(api.clone());

    let created = service.create_task(&with_pdf(draft())).await.unwrap();
    assert_eq!(created.warnings, vec![UPLOAD_FAILED_MESSAGE.to_owned()]);
    assert!(created.task.file.is_none());
    assert!(created.task.assigned_to.is_empty());
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn upload_without_url_warns_and_continues() {
    let api = Arc::new(FakeApi {
        upload: Some(from_json(json!({ "data": {} }))),
        ..FakeApi::default()
    });
    let created = AdminTaskService::new(api)
        .create_task(&with_pdf(draft()))
        .await
        .unwrap();
    assert_eq!(created.warnings, vec![UPLOAD_WITHOUT_URL_MESSAGE.to_owned()]);
    assert!(created.task.file.is_none());
}

#[tokio::test]
async fn create_failure_is_reported() {
    let api = Arc::new(FakeApi {
        fail_create: true,
        ..FakeApi::default()
    });
    let err = AdminTaskService::new(api).create_task(&draft()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create task: boom");
}

#[tokio::test]
async fn student_tasks_require_login() {
    let api = Arc::new(FakeApi::default());
    let err = StudentTaskService::new(api.clone(), None).load().await.unwrap_err();
    assert_eq!(err.to_string(), "Please log in to view tasks");

    let nameless = Session::new(UserId::new(""), "tok");
    let err = StudentTaskService::new(api.clone(), Some(nameless))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::MissingUserId));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn student_tasks_load_for_session_user() {
    let api = Arc::new(FakeApi {
        user_tasks: Some(vec![from_json(json!({
            "_id": "t1",
            "title": "Essay",
            "dueDate": "2025-06-01T00:00:00.000Z",
            "mySubmission": { "status": "reviewed", "markGiven": "9/10" }
        }))]),
        ..FakeApi::default()
    });
    let session = Session::new(UserId::new("u7"), "tok");
    let tasks = StudentTaskService::new(api.clone(), Some(session))
        .load()
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].due_at().is_some());
    assert_eq!(
        tasks[0].my_submission.as_ref().and_then(|s| s.mark_given.as_deref()),
        Some("9/10")
    );
    assert_eq!(api.calls(), vec![Call::ListUserTasks("u7".into())]);
}

#[tokio::test]
async fn non_list_student_response_is_an_error() {
    let api = Arc::new(FakeApi::default());
    let session = Session::new(UserId::new("u7"), "tok");
    let err = StudentTaskService::new(api, Some(session)).load().await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid response format from server");
}
