use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudentTaskVm, map_student_tasks};

#[component]
pub fn UserTaskView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.student_tasks();

    let mut resource = use_resource(move || {
        let service = service.clone();
        async move {
            let tasks = service.load().await?;
            Ok::<_, ViewError>(map_student_tasks(&tasks))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page user-tasks",
            h2 { "My Tasks" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading tasks..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "load-error",
                        p { class: "error", "{err.message()}" }
                        button {
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(tasks) => rsx! {
                    if tasks.is_empty() {
                        p { class: "muted", "No tasks assigned to you yet." }
                    } else {
                        ul {
                            for task in tasks {
                                StudentTaskCard { key: "{task.key}", task }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StudentTaskCard(task: StudentTaskVm) -> Element {
    rsx! {
        li { class: "task-card",
            h3 { "{task.title}" }
            p { "{task.description}" }
            p { class: "muted", "Due: {task.due_label}" }
            if let Some(url) = task.file_url {
                div { class: "task-file",
                    a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "View Task File" }
                    p { class: "muted small", "Note: File preview may not be supported for all file types." }
                }
            }
            if let Some(submission) = task.submission {
                div { class: "submission",
                    p { "Your Submission:" }
                    p { class: "muted", "{submission.status_line()}" }
                    if let Some(url) = submission.file_url {
                        a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "View Submission File" }
                    }
                    if let Some(link) = submission.drive_link {
                        a { href: "{link}", target: "_blank", rel: "noopener noreferrer", "View Drive Link" }
                    }
                    if let Some(note) = submission.review_note {
                        p { class: "muted", "Review: {note}" }
                    }
                }
            }
        }
    }
}
