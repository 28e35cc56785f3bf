use std::path::PathBuf;

use dioxus::prelude::*;

use lms_core::model::{AssignmentMode, Task, TaskDraft, User};

use crate::context::AppContext;
use crate::views::MessageList;
use crate::vm::{
    AdminTaskRowVm, MessageKind, MessageLog, map_admin_task_rows, map_user_options,
    read_attachment,
};

#[component]
pub fn AdminTaskView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.admin_tasks();

    let messages = use_signal(MessageLog::default);
    let mut tasks = use_signal(Vec::<Task>::new);
    let mut users = use_signal(Vec::<User>::new);
    let mut draft = use_signal(TaskDraft::new);
    let mut file_path = use_signal(String::new);
    let submitting = use_signal(|| false);

    let resource = {
        let service = service.clone();
        use_resource(move || {
            let service = service.clone();
            let mut messages = messages;
            async move {
                let data = service.load().await;
                tasks.set(data.tasks);
                users.set(data.users);
                messages.write().extend(MessageKind::Error, data.messages);
            }
        })
    };
    let loading = resource.value().read().is_none();

    let on_attach = use_callback(move |()| {
        let raw = file_path.read().trim().to_owned();
        if raw.is_empty() {
            draft.write().clear_attachment();
            return;
        }
        let mut messages = messages;
        spawn(async move {
            match read_attachment(&PathBuf::from(&raw)).await {
                Ok(selection) => {
                    if let Err(rejected) = draft.write().select_attachment(selection) {
                        messages.write().push(MessageKind::Error, rejected.to_string());
                    }
                }
                Err(err) => {
                    draft.write().clear_attachment();
                    messages
                        .write()
                        .push(MessageKind::Error, format!("Could not read {raw}: {err}"));
                }
            }
        });
    });

    let on_submit = {
        let service = service.clone();
        use_callback(move |()| {
            if submitting() {
                return;
            }
            let service = service.clone();
            let snapshot = draft.read().clone();
            let mut messages = messages;
            let mut submitting = submitting;
            spawn(async move {
                submitting.set(true);
                match service.create_task(&snapshot).await {
                    Ok(created) => {
                        tasks.write().push(created.task);
                        draft.set(TaskDraft::new());
                        file_path.set(String::new());
                        let mut log = messages.write();
                        log.clear();
                        log.extend(MessageKind::Warning, created.warnings);
                    }
                    Err(err) => {
                        messages.write().extend(MessageKind::Error, err.messages());
                    }
                }
                submitting.set(false);
            });
        })
    };

    let current = draft.read().clone();
    let user_options = map_user_options(&users.read(), &current.selected_users);
    let rows = map_admin_task_rows(&tasks.read(), &users.read());
    let attached = current
        .attachment()
        .map(|attachment| attachment.file_name().to_owned());

    rsx! {
        div { class: "page admin-tasks",
            MessageList { log: messages }

            section { class: "task-form",
                h2 { "Add Task" }

                label { r#for: "task-title", "Task Title" }
                input {
                    id: "task-title",
                    r#type: "text",
                    placeholder: "Assign New Task",
                    value: "{current.title}",
                    oninput: move |evt| draft.write().title = evt.value(),
                }

                label { r#for: "task-description", "Description" }
                textarea {
                    id: "task-description",
                    rows: "4",
                    placeholder: "Description",
                    value: "{current.description}",
                    oninput: move |evt| draft.write().description = evt.value(),
                }

                label { r#for: "task-due-date", "Due Date" }
                input {
                    id: "task-due-date",
                    r#type: "date",
                    value: "{current.due_date}",
                    oninput: move |evt| draft.write().due_date = evt.value(),
                }

                fieldset { class: "assign-to",
                    legend { "Assign To" }
                    label {
                        input {
                            r#type: "radio",
                            name: "assign-mode",
                            checked: current.mode == AssignmentMode::Admin,
                            onchange: move |_| draft.write().mode = AssignmentMode::Admin,
                        }
                        "Admin"
                    }
                    label {
                        input {
                            r#type: "radio",
                            name: "assign-mode",
                            checked: current.mode == AssignmentMode::SpecificUsers,
                            onchange: move |_| draft.write().mode = AssignmentMode::SpecificUsers,
                        }
                        "User"
                    }

                    if current.mode == AssignmentMode::SpecificUsers {
                        div { class: "user-options",
                            if user_options.is_empty() {
                                p { class: "muted", "No users available" }
                            }
                            for option in user_options {
                                label { key: "{option.id}",
                                    input {
                                        r#type: "checkbox",
                                        checked: option.selected,
                                        onchange: {
                                            let id = option.id.clone();
                                            move |evt: Event<FormData>| {
                                                draft.write().set_user_selected(&id, evt.checked());
                                            }
                                        },
                                    }
                                    "{option.label}"
                                }
                            }
                        }
                    }
                }

                label { r#for: "task-file", "Attach PDF" }
                div { class: "file-row",
                    input {
                        id: "task-file",
                        r#type: "text",
                        placeholder: "/path/to/brief.pdf",
                        value: "{file_path}",
                        oninput: move |evt| file_path.set(evt.value()),
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| on_attach.call(()),
                        "Attach"
                    }
                }
                if let Some(name) = attached {
                    p { class: "attached-file", "Selected: {name}" }
                }

                button {
                    class: "primary",
                    r#type: "button",
                    disabled: submitting(),
                    onclick: move |_| on_submit.call(()),
                    if submitting() { "Uploading..." } else { "Add Task" }
                }
            }

            section { class: "task-list",
                h2 { "Assigned Tasks" }
                if loading {
                    p { "Loading tasks..." }
                } else if rows.is_empty() {
                    p { "No tasks have been created yet" }
                } else {
                    ul {
                        for row in rows {
                            TaskRow { key: "{row.key}", row }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskRow(row: AdminTaskRowVm) -> Element {
    rsx! {
        li { class: "task-row",
            h3 { "{row.title}" }
            p { "{row.description}" }
            p { class: "muted", "Due: {row.due_label}" }
            p { class: "muted", "Assigned to: {row.assignees_label}" }
            if let Some(url) = row.file_url {
                p {
                    "Attached PDF: "
                    a { href: "{url}", target: "_blank", "View PDF" }
                }
            }
        }
    }
}
