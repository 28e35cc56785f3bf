use serde_json::json;

use super::test_harness::{FixtureApi, ViewKind, setup_view_harness, student};

fn course_fixture() -> serde_json::Value {
    json!({
        "_id": "c1",
        "title": "Rust Basics",
        "thumbnail": "https://cdn/thumb.png",
        "lessons": [{
            "title": "Getting Started",
            "sublessons": [
                { "title": "Welcome", "file": { "url": "https://cdn/welcome.mp4", "type": "video/mp4" } },
                { "title": "Check-in", "test": { "questions": [
                    { "question": "2 + 2?", "options": ["3", "4"], "answer": "4" }
                ] } }
            ]
        }]
    })
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_shows_login_state() {
    let mut harness = setup_view_harness(ViewKind::Home, FixtureApi::default(), Some(student()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Logged in as u1"), "missing login in {html}");

    let mut harness = setup_view_harness(ViewKind::Home, FixtureApi::default(), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Not logged in"), "missing logout in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_lists_tasks_with_assignees() {
    let api = FixtureApi {
        tasks: Some(json!([{
            "_id": "t1",
            "title": "Essay",
            "description": "Write 500 words",
            "dueDate": "2024-05-01T00:00:00.000Z",
            "assignedTo": ["u1"],
            "file": "https://files/brief.pdf"
        }])),
        users: Some(json!([{ "_id": "u1", "username": "alice" }])),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::AdminTasks, api, None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Assigned Tasks"), "missing heading in {html}");
    assert!(html.contains("Essay"), "missing title in {html}");
    assert!(html.contains("Due: 01/05/2024"), "missing due date in {html}");
    assert!(html.contains("Assigned to: alice"), "missing assignee in {html}");
    assert!(html.contains("Attached PDF:"), "missing file link in {html}");
    assert!(html.contains("Add Task"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_reports_failed_fetch_and_keeps_users() {
    let api = FixtureApi {
        tasks: None,
        users: Some(json!([{ "_id": "u1", "name": "Bob" }])),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::AdminTasks, api, None);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Failed to fetch tasks or users"),
        "missing fetch message in {html}"
    );
    assert!(
        html.contains("No tasks have been created yet"),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn user_tasks_require_login() {
    let mut harness = setup_view_harness(ViewKind::UserTasks, FixtureApi::default(), None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please log in to view tasks"), "missing login error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn user_tasks_render_submission_details() {
    let api = FixtureApi {
        user_tasks: Some(json!([{
            "_id": "t1",
            "title": "",
            "dueDate": "not a date",
            "file": "https://files/brief.pdf",
            "mySubmission": {
                "status": "graded",
                "markGiven": 8,
                "driveLink": "https://drive/x",
                "reviewNote": "Nice work"
            }
        }])),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::UserTasks, api, Some(student()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("My Tasks"), "missing heading in {html}");
    assert!(html.contains("Untitled"), "missing title fallback in {html}");
    assert!(html.contains("No description"), "missing description fallback in {html}");
    assert!(html.contains("Due: Invalid Date"), "missing due fallback in {html}");
    assert!(html.contains("View Task File"), "missing task file in {html}");
    assert!(html.contains("Marks: 8"), "missing marks in {html}");
    assert!(html.contains("View Drive Link"), "missing drive link in {html}");
    assert!(html.contains("Review: Nice work"), "missing review in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn user_tasks_empty_list() {
    let api = FixtureApi {
        user_tasks: Some(json!([])),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::UserTasks, api, Some(student()));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No tasks assigned to you yet."),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_opens_first_sublesson() {
    let api = FixtureApi {
        course: Some(course_fixture()),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::Course("c1".into()), api, Some(student()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust Basics"), "missing course title in {html}");
    assert!(html.contains("0% Completed"), "missing progress in {html}");
    assert!(html.contains("Welcome"), "missing sublesson in {html}");
    assert!(html.contains("1.1"), "missing ordinal in {html}");
    assert!(html.contains("https://cdn/welcome.mp4"), "missing video source in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_errors_are_shown_with_retry() {
    let mut harness = setup_view_harness(
        ViewKind::Course("c1".into()),
        FixtureApi::default(),
        Some(student()),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Error: Course not found"), "missing not found in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");

    let api = FixtureApi {
        course: Some(course_fixture()),
        ..FixtureApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::Course("c1".into()), api, None);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Error: Please log in to access this course"),
        "missing login error in {html}"
    );
}
