use lms_core::model::{Task, User, UserId};

use crate::vm::time_fmt::format_due_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminTaskRowVm {
    pub key: String,
    pub title: String,
    pub description: String,
    pub due_label: String,
    pub assignees_label: String,
    pub file_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserOptionVm {
    pub id: UserId,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionVm {
    pub status: String,
    pub mark: Option<String>,
    pub file_url: Option<String>,
    pub drive_link: Option<String>,
    pub review_note: Option<String>,
}

impl SubmissionVm {
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.mark {
            Some(mark) => format!("Status: {}, Marks: {mark}", self.status),
            None => format!("Status: {}", self.status),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentTaskVm {
    pub key: String,
    pub title: String,
    pub description: String,
    pub due_label: String,
    pub file_url: Option<String>,
    pub submission: Option<SubmissionVm>,
}

fn row_key(task: &Task, index: usize) -> String {
    task.id
        .as_ref()
        .map_or_else(|| format!("row-{index}"), ToString::to_string)
}

#[must_use]
pub fn map_admin_task_rows(tasks: &[Task], users: &[User]) -> Vec<AdminTaskRowVm> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| AdminTaskRowVm {
            key: row_key(task, index),
            title: task.title.clone(),
            description: task.description.clone(),
            due_label: format_due_date(task.due_date.as_deref()),
            assignees_label: task.assignee_label(users),
            file_url: task.file.clone(),
        })
        .collect()
}

#[must_use]
pub fn map_user_options(users: &[User], selected: &[UserId]) -> Vec<UserOptionVm> {
    users
        .iter()
        .map(|user| UserOptionVm {
            id: user.id.clone(),
            label: user.display_name().to_owned(),
            selected: selected.contains(&user.id),
        })
        .collect()
}

#[must_use]
pub fn map_student_tasks(tasks: &[Task]) -> Vec<StudentTaskVm> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| StudentTaskVm {
            key: row_key(task, index),
            title: non_empty_or(&task.title, "Untitled"),
            description: non_empty_or(&task.description, "No description"),
            due_label: format_due_date(task.due_date.as_deref()),
            file_url: task.file.clone(),
            submission: task.my_submission.as_ref().map(|submission| SubmissionVm {
                status: submission.status.clone().unwrap_or_else(|| "N/A".to_owned()),
                mark: submission.mark_given.clone(),
                file_url: submission.file.clone(),
                drive_link: submission.drive_link.clone(),
                review_note: submission.review_note.clone(),
            }),
        })
        .collect()
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{Assignee, TaskId, TaskSubmission};

    fn task(title: &str) -> Task {
        Task {
            id: Some(TaskId::new("t1")),
            title: title.into(),
            description: String::new(),
            due_date: Some("2025-06-01T00:00:00Z".into()),
            assigned_to: vec![Assignee::Id(UserId::new("u1"))],
            file: None,
            my_submission: None,
        }
    }

    #[test]
    fn admin_rows_resolve_assignees_against_users() {
        let users = vec![User {
            id: UserId::new("u1"),
            username: Some("ada".into()),
            name: None,
        }];
        let rows = map_admin_task_rows(&[task("Essay")], &users);
        assert_eq!(rows[0].assignees_label, "ada");
        assert_eq!(rows[0].due_label, "01/06/2025");
        assert_eq!(rows[0].key, "t1");

        let options = map_user_options(&users, &[UserId::new("u1")]);
        assert!(options[0].selected);
        assert_eq!(options[0].label, "ada");
    }

    #[test]
    fn student_rows_fill_placeholders() {
        let mut blank = task("");
        blank.id = None;
        blank.due_date = None;
        blank.my_submission = Some(TaskSubmission {
            mark_given: Some("7".into()),
            ..TaskSubmission::default()
        });
        let rows = map_student_tasks(&[blank]);
        assert_eq!(rows[0].title, "Untitled");
        assert_eq!(rows[0].description, "No description");
        assert_eq!(rows[0].due_label, "N/A");
        assert_eq!(rows[0].key, "row-0");
        let submission = rows[0].submission.as_ref().unwrap();
        assert_eq!(submission.status_line(), "Status: N/A, Marks: 7");
    }
}
