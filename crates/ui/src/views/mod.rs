mod admin_tasks;
mod course_content;
mod home;
mod messages;
mod state;
mod user_tasks;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin_tasks::AdminTaskView;
pub use course_content::CourseContentView;
pub use home::HomeView;
pub use messages::MessageList;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use user_tasks::UserTaskView;
