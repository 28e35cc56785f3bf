mod attachment;
mod completion;
mod course;
mod ids;
mod navigator;
mod quiz;
mod quiz_result;
mod session;
mod task;

pub use attachment::{
    Attachment, AttachmentError, MAX_ATTACHMENT_BYTES, content_type_for_file_name,
    validate_selection,
};
pub use completion::{CompletionKey, CompletionSet, Cursor, ParseKeyError, progress_percent};
pub use course::{
    Content, ContentKind, Course, DEFAULT_COURSE_TITLE, DEFAULT_LESSON_TITLE,
    DEFAULT_SUBLESSON_TITLE, Lesson, Question, Quiz, RenderKind, Sublesson,
};
pub use ids::{CourseId, ParseIdError, TaskId, UserId};
pub use navigator::{CourseNavigator, Effect, QuizOutcome, QuizSubmission, Transition};
pub use quiz::{GradedAnswer, QuizAttempt, QuizError, QuizGrade, QuizPhase};
pub use quiz_result::QuizResultRecord;
pub use session::Session;
pub use task::{
    AssignmentMode, Assignee, NewTask, Task, TaskDraft, TaskSubmission, TaskValidationError,
    TaskValidationErrors, User,
};
