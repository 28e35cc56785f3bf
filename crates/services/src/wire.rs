//! Backend payloads and their normalization into domain values.
//!
//! The backend is loose about shape: fields go missing, `assignedTo` may hold
//! ids or populated users, and lists sometimes arrive as something else.
//! Everything here tolerates that and produces well-formed domain values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lms_core::model::{
    Assignee, CompletionKey, CompletionSet, Content, ContentKind, Course, CourseId,
    DEFAULT_COURSE_TITLE, DEFAULT_LESSON_TITLE, DEFAULT_SUBLESSON_TITLE, GradedAnswer, Lesson,
    NewTask, Question, Quiz, Sublesson, Task, TaskId, TaskSubmission, User, UserId,
};

//
// ─── COURSES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lessons: Option<Vec<LessonDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sublessons: Option<Vec<SublessonDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SublessonDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file: Option<FileDto>,
    #[serde(default)]
    pub test: Option<TestDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDto {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestDto {
    #[serde(default)]
    pub questions: Option<Vec<QuestionDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionDto {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// Missing lesson or sublesson lists become empty; missing titles get placeholders.
#[must_use]
pub fn normalize_course(dto: CourseDto, requested_id: &CourseId) -> Course {
    let id = non_blank(dto.id).map_or_else(|| requested_id.clone(), CourseId::new);
    let lessons = dto
        .lessons
        .unwrap_or_default()
        .into_iter()
        .map(normalize_lesson)
        .collect();
    Course::new(
        id,
        non_blank(dto.title).unwrap_or_else(|| DEFAULT_COURSE_TITLE.into()),
        dto.thumbnail.unwrap_or_default(),
        dto.description.unwrap_or_default(),
        lessons,
    )
}

fn normalize_lesson(dto: LessonDto) -> Lesson {
    let sublessons = dto
        .sublessons
        .unwrap_or_default()
        .into_iter()
        .map(normalize_sublesson)
        .collect();
    Lesson::new(
        non_blank(dto.title).unwrap_or_else(|| DEFAULT_LESSON_TITLE.into()),
        sublessons,
    )
}

fn normalize_sublesson(dto: SublessonDto) -> Sublesson {
    // A file entry without a URL is kept so the viewer can say it is unavailable.
    let content = dto.file.map(|file| {
        let kind = ContentKind::from_declared_type(file.kind.as_deref().unwrap_or_default());
        Content::new(non_blank(file.url).unwrap_or_default(), kind)
    });
    let questions = dto
        .test
        .and_then(|test| test.questions)
        .unwrap_or_default()
        .into_iter()
        .map(|question| {
            Question::new(
                question.question.unwrap_or_default(),
                question.options.unwrap_or_default(),
                question.answer.unwrap_or_default(),
            )
        })
        .collect();
    Sublesson::new(
        non_blank(dto.title).unwrap_or_else(|| DEFAULT_SUBLESSON_TITLE.into()),
        content,
        Quiz::new(questions),
    )
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressResponseDto {
    #[serde(default)]
    pub progress: Option<ProgressDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDto {
    #[serde(default)]
    pub completed_lessons: Vec<CompletedLessonDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLessonDto {
    pub lesson_index: usize,
    #[serde(default)]
    pub sublessons: Vec<CompletedSublessonDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSublessonDto {
    pub sublesson_index: usize,
    #[serde(default)]
    pub is_completed: bool,
}

/// Flattens the nested progress document into completion keys.
#[must_use]
pub fn completion_set_from_progress(dto: &ProgressResponseDto) -> CompletionSet {
    let Some(progress) = dto.progress.as_ref() else {
        return CompletionSet::new();
    };
    progress
        .completed_lessons
        .iter()
        .flat_map(|lesson| {
            lesson
                .sublessons
                .iter()
                .filter(|sublesson| sublesson.is_completed)
                .map(|sublesson| CompletionKey::new(lesson.lesson_index, sublesson.sublesson_index))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub lesson_index: usize,
    pub sublesson_index: usize,
}

impl From<CompletionKey> for ProgressUpdateRequest {
    fn from(key: CompletionKey) -> Self {
        Self {
            lesson_index: key.lesson_index,
            sublesson_index: key.sublesson_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<GradedAnswer>,
    pub sublesson_title: String,
}

//
// ─── TASKS & USERS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Bare ids, populated users, or occasionally not a list at all.
    #[serde(default)]
    pub assigned_to: Value,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub my_submission: Option<SubmissionDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    #[serde(default)]
    pub status: Option<String>,
    /// Number or string depending on who graded it.
    #[serde(default)]
    pub mark_given: Value,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub drive_link: Option<String>,
    #[serde(default)]
    pub review_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    /// RFC 3339, midnight UTC of the chosen day.
    pub due_date: String,
    pub assigned_to: Vec<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl CreateTaskRequest {
    #[must_use]
    pub fn new(task: &NewTask, file: Option<String>) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_at().to_rfc3339(),
            assigned_to: task.assigned_to.clone(),
            file,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponseDto {
    #[serde(default)]
    pub data: Option<UploadDataDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDataDto {
    #[serde(default)]
    pub file_url: Option<String>,
}

impl UploadResponseDto {
    #[must_use]
    pub fn file_url(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.file_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[must_use]
pub fn normalize_user(dto: UserDto) -> User {
    User {
        id: UserId::new(dto.id.unwrap_or_default()),
        username: non_blank(dto.username),
        name: non_blank(dto.name),
    }
}

/// A non-list `assignedTo` becomes an empty assignee list.
#[must_use]
pub fn normalize_task(dto: TaskDto) -> Task {
    let assigned_to = match dto.assigned_to {
        Value::Array(entries) => entries.into_iter().filter_map(normalize_assignee).collect(),
        _ => Vec::new(),
    };
    Task {
        id: non_blank(dto.id).map(TaskId::new),
        title: dto.title.unwrap_or_default(),
        description: dto.description.unwrap_or_default(),
        due_date: non_blank(dto.due_date),
        assigned_to,
        file: non_blank(dto.file),
        my_submission: dto.my_submission.map(normalize_submission),
    }
}

fn normalize_assignee(entry: Value) -> Option<Assignee> {
    match entry {
        Value::String(id) => Some(Assignee::Id(UserId::new(id))),
        Value::Object(_) => serde_json::from_value::<UserDto>(entry)
            .ok()
            .map(|user| Assignee::User(normalize_user(user))),
        _ => None,
    }
}

fn normalize_submission(dto: SubmissionDto) -> TaskSubmission {
    let mark_given = match dto.mark_given {
        Value::Number(number) if number.as_f64().is_some_and(|mark| mark != 0.0) => {
            Some(number.to_string())
        }
        Value::String(mark) => Some(mark).filter(|mark| !mark.trim().is_empty()),
        _ => None,
    };
    TaskSubmission {
        status: non_blank(dto.status),
        mark_given,
        file: non_blank(dto.file),
        drive_link: non_blank(dto.drive_link),
        review_note: non_blank(dto.review_note),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
