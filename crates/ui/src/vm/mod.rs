mod attachment_vm;
mod course_vm;
mod messages_vm;
mod task_vm;
mod time_fmt;

pub use attachment_vm::read_attachment;
pub use course_vm::{
    ContentBodyVm, CourseVm, CurrentContentVm, LessonVm, MediaKind, OptionVm, QuizVm,
    SublessonLinkVm, map_course,
};
pub use messages_vm::{MessageKind, MessageLog, MessageVm};
pub use task_vm::{
    AdminTaskRowVm, StudentTaskVm, SubmissionVm, UserOptionVm, map_admin_task_rows,
    map_student_tasks, map_user_options,
};
pub use time_fmt::{format_day, format_due_date};
