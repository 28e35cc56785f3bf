use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::model::attachment::{Attachment, AttachmentError};
use crate::model::ids::{TaskId, UserId};
use crate::time::{parse_calendar_date, parse_timestamp, start_of_day_utc};

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub name: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            name: None,
        }
    }

    /// Username, then name, then the raw id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.name.as_deref().filter(|value| !value.is_empty()))
            .or_else(|| Some(self.id.as_str()).filter(|value| !value.is_empty()))
            .unwrap_or("Unknown User")
    }
}

/// An `assignedTo` entry: the backend sends either a bare id or a populated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
    Id(UserId),
    User(User),
}

impl Assignee {
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        match self {
            Assignee::Id(id) => id,
            Assignee::User(user) => &user.id,
        }
    }
}

//
// ─── TASKS ─────────────────────────────────────────────────────────────────────
//

/// A student's submission attached to a task in the student task list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskSubmission {
    pub status: Option<String>,
    pub mark_given: Option<String>,
    pub file: Option<String>,
    pub drive_link: Option<String>,
    pub review_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Option<TaskId>,
    pub title: String,
    pub description: String,
    /// Raw value from the backend; may be missing or unparsable.
    pub due_date: Option<String>,
    pub assigned_to: Vec<Assignee>,
    pub file: Option<String>,
    pub my_submission: Option<TaskSubmission>,
}

impl Task {
    #[must_use]
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_timestamp)
    }

    /// Comma-separated assignee names, resolving bare ids against `users`.
    ///
    /// A task without assignees belongs to the admin.
    #[must_use]
    pub fn assignee_label(&self, users: &[User]) -> String {
        if self.assigned_to.is_empty() {
            return "Admin".to_owned();
        }
        self.assigned_to
            .iter()
            .map(|assignee| match assignee {
                Assignee::User(user) => user.display_name().to_owned(),
                Assignee::Id(id) => users
                    .iter()
                    .find(|user| user.id == *id)
                    .map_or_else(|| id.to_string(), |user| user.display_name().to_owned()),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

//
// ─── FORM ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentMode {
    /// Task is kept by the admin; no assignees are sent.
    #[default]
    Admin,
    SpecificUsers,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskValidationError {
    #[error("Task Title is required.")]
    MissingTitle,

    #[error("Description is required.")]
    MissingDescription,

    #[error("Due Date is required.")]
    MissingDueDate,

    #[error("Due Date must be a valid date (YYYY-MM-DD).")]
    InvalidDueDate,

    #[error("Please select at least one user.")]
    NoAssignees,
}

/// Every validation failure of a single submit attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct TaskValidationErrors(Vec<TaskValidationError>);

impl TaskValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[TaskValidationError] {
        &self.0
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for TaskValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

/// Validated input for the create-task call, before any upload happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_to: Vec<UserId>,
}

impl NewTask {
    #[must_use]
    pub fn due_at(&self) -> DateTime<Utc> {
        start_of_day_utc(self.due_date)
    }
}

/// Admin "Add Task" form state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// As typed into the date input.
    pub due_date: String,
    pub mode: AssignmentMode,
    pub selected_users: Vec<UserId>,
    attachment: Option<Attachment>,
}

impl TaskDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn set_user_selected(&mut self, user_id: &UserId, selected: bool) {
        let present = self.selected_users.contains(user_id);
        if selected && !present {
            self.selected_users.push(user_id.clone());
        } else if !selected {
            self.selected_users.retain(|id| id != user_id);
        }
    }

    /// Replaces the attachment with a validated file, or clears it on rejection.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; the field is left empty in that case.
    pub fn select_attachment(
        &mut self,
        selection: Result<Attachment, AttachmentError>,
    ) -> Result<(), AttachmentError> {
        match selection {
            Ok(attachment) => {
                self.attachment = Some(attachment);
                Ok(())
            }
            Err(err) => {
                self.attachment = None;
                Err(err)
            }
        }
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Collects every failure instead of stopping at the first one.
    ///
    /// # Errors
    ///
    /// Returns `TaskValidationErrors` listing each missing or invalid field.
    pub fn validate(&self) -> Result<NewTask, TaskValidationErrors> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() {
            errors.push(TaskValidationError::MissingTitle);
        }
        if description.is_empty() {
            errors.push(TaskValidationError::MissingDescription);
        }
        let due_date = if self.due_date.trim().is_empty() {
            errors.push(TaskValidationError::MissingDueDate);
            None
        } else {
            let parsed = parse_calendar_date(&self.due_date);
            if parsed.is_none() {
                errors.push(TaskValidationError::InvalidDueDate);
            }
            parsed
        };
        if self.mode == AssignmentMode::SpecificUsers && self.selected_users.is_empty() {
            errors.push(TaskValidationError::NoAssignees);
        }

        match due_date {
            Some(due_date) if errors.is_empty() => Ok(NewTask {
                title: title.to_owned(),
                description: description.to_owned(),
                due_date,
                assigned_to: match self.mode {
                    AssignmentMode::Admin => Vec::new(),
                    AssignmentMode::SpecificUsers => self.selected_users.clone(),
                },
            }),
            _ => Err(TaskValidationErrors(errors)),
        }
    }
}
